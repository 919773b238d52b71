//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Property` with the provided attributes.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PROPERTY_COORDINATES` - coordinates are out of range;
    /// - `INVALID_PROPERTY_SIZE` - rooms or area are out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createProperty",
            otel.name = Self::SPAN_NAME,
            title = %input.title,
        ),
    )]
    pub async fn create_property(
        input: api::property::Input,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let attrs = command::property::Attributes::try_from(input)
            .map_err(Error::from)
            .map_err(ctx.error())?;
        ctx.service()
            .execute(command::CreateProperty(attrs))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the attributes of the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist;
    /// - `INVALID_PROPERTY_COORDINATES` - coordinates are out of range;
    /// - `INVALID_PROPERTY_SIZE` - rooms or area are out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateProperty",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_property(
        id: api::property::Id,
        input: api::property::Input,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let attributes = command::property::Attributes::try_from(input)
            .map_err(Error::from)
            .map_err(ctx.error())?;
        ctx.service()
            .execute(command::UpdateProperty {
                id: id.into(),
                attributes,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Property` with the specified ID, returning it.
    ///
    /// Entities referring to the deleted `Property` are left intact.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteProperty",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<domain::Property>::new(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Client` with the provided attributes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createClient",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_client(
        input: api::client::Input,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        ctx.service()
            .execute(command::CreateClient(input.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the attributes of the `Client` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - the `Client` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateClient",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_client(
        id: api::client::Id,
        input: api::client::Input,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        ctx.service()
            .execute(command::UpdateClient {
                id: id.into(),
                attributes: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Client` with the specified ID, returning it.
    ///
    /// Entities referring to the deleted `Client` are left intact.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - the `Client` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteClient",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_client(
        id: api::client::Id,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<domain::Client>::new(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records a new `Commission`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DEAL_VALUE_UNKNOWN` - the deal value is neither specified nor can
    ///                          be taken from the `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCommission",
            otel.name = Self::SPAN_NAME,
            property_id = ?input.property_id,
        ),
    )]
    pub async fn create_commission(
        input: api::commission::CreateInput,
        ctx: &Context,
    ) -> Result<api::Commission, Error> {
        ctx.service()
            .execute(command::CreateCommission::from(input))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the attributes of the `Commission` with the specified ID,
    /// recalculating its amount.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMMISSION_NOT_EXISTS` - the `Commission` with the specified ID
    ///                             does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCommission",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_commission(
        id: api::commission::Id,
        input: api::commission::Input,
        ctx: &Context,
    ) -> Result<api::Commission, Error> {
        ctx.service()
            .execute(command::UpdateCommission {
                id: id.into(),
                attributes: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Commission` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMMISSION_NOT_EXISTS` - the `Commission` with the specified ID
    ///                             does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCommission",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_commission(
        id: api::commission::Id,
        ctx: &Context,
    ) -> Result<api::Commission, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<domain::Commission>::new(
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Logs a new `Interaction`.
    #[tracing::instrument(
        skip_all,
        fields(
            client_id = %input.client_id,
            gql.name = "createInteraction",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_interaction(
        input: api::interaction::Input,
        ctx: &Context,
    ) -> Result<api::Interaction, Error> {
        ctx.service()
            .execute(command::CreateInteraction(input.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the attributes of the `Interaction` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INTERACTION_NOT_EXISTS` - the `Interaction` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateInteraction",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_interaction(
        id: api::interaction::Id,
        input: api::interaction::Input,
        ctx: &Context,
    ) -> Result<api::Interaction, Error> {
        ctx.service()
            .execute(command::UpdateInteraction {
                id: id.into(),
                attributes: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Interaction` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INTERACTION_NOT_EXISTS` - the `Interaction` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteInteraction",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_interaction(
        id: api::interaction::Id,
        ctx: &Context,
    ) -> Result<api::Interaction, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<domain::Interaction>::new(
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Reminder`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createReminder",
            otel.name = Self::SPAN_NAME,
            title = %input.title,
        ),
    )]
    pub async fn create_reminder(
        input: api::reminder::Input,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        ctx.service()
            .execute(command::CreateReminder(input.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overwrites the attributes of the `Reminder` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_reminder(
        id: api::reminder::Id,
        input: api::reminder::Input,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        ctx.service()
            .execute(command::UpdateReminder {
                id: id.into(),
                attributes: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks the `Reminder` with the specified ID as `COMPLETED`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "completeReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn complete_reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        Self::set_reminder_status(id, domain::reminder::Status::Completed, ctx)
            .await
    }

    /// Marks the `Reminder` with the specified ID as `DISMISSED`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "dismissReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dismiss_reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        Self::set_reminder_status(id, domain::reminder::Status::Dismissed, ctx)
            .await
    }

    /// Deletes the `Reminder` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REMINDER_NOT_EXISTS` - the `Reminder` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteReminder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_reminder(
        id: api::reminder::Id,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<domain::Reminder>::new(
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl Mutation {
    /// Sets the provided [`domain::reminder::Status`] to the `Reminder` with
    /// the specified ID.
    async fn set_reminder_status(
        id: api::reminder::Id,
        status: domain::reminder::Status,
        ctx: &Context,
    ) -> Result<api::Reminder, Error> {
        ctx.service()
            .execute(command::SetReminderStatus {
                id: id.into(),
                status,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
