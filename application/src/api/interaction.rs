//! [`Interaction`]-related definitions.

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// An activity logged against a `Client`.
#[derive(Clone, Debug, From)]
pub struct Interaction(domain::Interaction);

/// An activity logged against a `Client`.
#[graphql_object(context = Context)]
impl Interaction {
    /// Unique identifier of this `Interaction`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Client` this `Interaction` was made with.
    ///
    /// `null` if the `Client` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Interaction.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        ctx.service()
            .execute(query::client::ById::by(self.0.client_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// `Property` this `Interaction` concerns.
    ///
    /// `null` if not specified, or the `Property` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Interaction.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        let Some(id) = self.0.property_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::property::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }

    /// Kind of this `Interaction`.
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Title of this `Interaction`.
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Free-form description of this `Interaction`.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// `DateTime` this `Interaction` occurred at.
    pub fn occurred_at(&self) -> DateTime {
        self.0.occurred_at.coerce()
    }

    /// Outcome of this `Interaction`.
    pub fn outcome(&self) -> Outcome {
        self.0.outcome.into()
    }

    /// `DateTime` when this `Interaction` was logged.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Attributes of an `Interaction` to be logged or updated with.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "InteractionInput")]
pub struct Input {
    /// ID of the `Client` the `Interaction` was made with.
    pub client_id: api::client::Id,

    /// ID of the `Property` the `Interaction` concerns.
    pub property_id: Option<api::property::Id>,

    /// Kind of the `Interaction`.
    pub kind: Kind,

    /// Title of the `Interaction`.
    pub title: Title,

    /// Free-form description. Empty, if omitted.
    pub description: Option<Description>,

    /// `DateTime` the `Interaction` occurred at. The current one, if
    /// omitted.
    pub occurred_at: Option<DateTime>,

    /// Outcome of the `Interaction`. `PENDING`, if omitted.
    pub outcome: Option<Outcome>,
}

impl From<Input> for command::interaction::Attributes {
    fn from(input: Input) -> Self {
        let Input {
            client_id,
            property_id,
            kind,
            title,
            description,
            occurred_at,
            outcome,
        } = input;
        Self {
            client_id: client_id.into(),
            property_id: property_id.map(Into::into),
            kind: kind.into(),
            title: title.into(),
            description: description.map(Into::into).unwrap_or_default(),
            occurred_at: occurred_at.map(DateTime::coerce),
            outcome: outcome
                .map_or(domain::interaction::Outcome::Pending, Into::into),
        }
    }
}

impl AsError for command::interaction::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InteractionNotExists(_) => {
                Some(InteractionError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum InteractionError {
        #[code = "INTERACTION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Interaction` with the specified ID does not exist"]
        NotExists,
    }
}

/// Unique identifier of an `Interaction`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::interaction::Id)]
#[into(domain::interaction::Id)]
#[graphql(name = "InteractionId", transparent)]
pub struct Id(Uuid);

/// Title of an `Interaction`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "InteractionTitle",
    with = scalar::Via::<domain::interaction::Title>,
)]
pub struct Title(domain::interaction::Title);

/// Free-form description of an `Interaction`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "InteractionDescription",
    with = scalar::Via::<domain::interaction::Description>,
)]
pub struct Description(domain::interaction::Description);

mirror_kind! {
    #[doc = "Kind of an `Interaction`."]
    #[graphql(name = "InteractionKind")]
    enum Kind = domain::interaction::Kind {
        #[doc = "Phone call."]
        Call,
        #[doc = "Email."]
        Email,
        #[doc = "Property viewing."]
        Viewing,
        #[doc = "In-person meeting."]
        Meeting,
        #[doc = "Plain note."]
        Note,
        #[doc = "Offer made or received."]
        Offer,
        #[doc = "Contract signing or negotiation."]
        Contract,
    }
}

mirror_kind! {
    #[doc = "Outcome of an `Interaction`."]
    #[graphql(name = "InteractionOutcome")]
    enum Outcome = domain::interaction::Outcome {
        #[doc = "Went well."]
        Positive,
        #[doc = "Neither good nor bad."]
        Neutral,
        #[doc = "Went badly."]
        Negative,
        #[doc = "Not known yet."]
        Pending,
    }
}
