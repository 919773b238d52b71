//! [`Command`]s for logging and updating an [`Interaction`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, interaction, property, Interaction},
    infra::{database, Database},
    Invalidation, Service,
};

use super::Command;

/// Editable attributes of an [`Interaction`].
#[derive(Clone, Debug)]
pub struct Attributes {
    /// ID of the [`Client`] the [`Interaction`] was made with.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: client::Id,

    /// ID of the [`Property`] the [`Interaction`] concerns, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// [`interaction::Kind`] of the [`Interaction`].
    pub kind: interaction::Kind,

    /// [`interaction::Title`] of the [`Interaction`].
    pub title: interaction::Title,

    /// [`interaction::Description`] of the [`Interaction`].
    pub description: interaction::Description,

    /// [`DateTime`] the [`Interaction`] occurred at.
    ///
    /// Current [`DateTime`] is used if not specified.
    pub occurred_at: Option<interaction::OccurrenceDateTime>,

    /// [`interaction::Outcome`] of the [`Interaction`].
    pub outcome: interaction::Outcome,
}

impl Attributes {
    /// Builds an [`Interaction`] with these [`Attributes`], falling back to
    /// the provided `occurred_at` if these [`Attributes`] don't specify it.
    fn into_interaction(
        self,
        id: interaction::Id,
        created_at: interaction::CreationDateTime,
        fallback_occurred_at: interaction::OccurrenceDateTime,
    ) -> Interaction {
        let Self {
            client_id,
            property_id,
            kind,
            title,
            description,
            occurred_at,
            outcome,
        } = self;
        Interaction {
            id,
            client_id,
            property_id,
            kind,
            title,
            description,
            occurred_at: occurred_at.unwrap_or(fallback_occurred_at),
            outcome,
            created_at,
        }
    }
}

/// [`Command`] for logging a new [`Interaction`].
#[derive(Clone, Debug, From)]
pub struct CreateInteraction(pub Attributes);

impl<Db> Command<CreateInteraction> for Service<Db>
where
    Db: Database<Insert<Interaction>, Err = Traced<database::Error>>,
{
    type Ok = Interaction;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        CreateInteraction(attrs): CreateInteraction,
    ) -> Result<Self::Ok, Self::Err> {
        let now = DateTime::now();
        let interaction = attrs.into_interaction(
            interaction::Id::new(),
            now.coerce(),
            now.coerce(),
        );

        self.database()
            .execute(Insert(interaction.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.invalidate(Invalidation::Interaction);
        Ok(interaction)
    }
}

/// [`Command`] for overwriting [`Attributes`] of an existing [`Interaction`].
#[derive(Clone, Debug)]
pub struct UpdateInteraction {
    /// ID of the [`Interaction`] to be updated.
    pub id: interaction::Id,

    /// New [`Attributes`] of the [`Interaction`].
    pub attributes: Attributes,
}

impl<Db> Command<UpdateInteraction> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Interaction>, interaction::Id>>,
            Ok = Option<Interaction>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Interaction, interaction::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Interaction>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Interaction;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateInteraction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateInteraction { id, attributes } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Interaction`.
        tx.execute(Lock(By::<Interaction, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Interaction>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InteractionNotExists(id))
            .map_err(tracerr::wrap!())?;

        let interaction = attributes.into_interaction(
            id,
            existing.created_at,
            existing.occurred_at,
        );
        tx.execute(Update(interaction.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Interaction);
        Ok(interaction)
    }
}

/// Error of [`UpdateInteraction`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Interaction`] with the provided ID does not exist.
    #[display("`Interaction(id: {_0})` does not exist")]
    #[from(ignore)]
    InteractionNotExists(#[error(not(source))] interaction::Id),
}
