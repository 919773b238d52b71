//! [`Command`]s for creating and updating a [`Client`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, property, Client},
    infra::{database, Database},
    Invalidation, Service,
};

use super::Command;

/// Editable attributes of a [`Client`].
#[derive(Clone, Debug)]
pub struct Attributes {
    /// [`client::Name`] of the [`Client`].
    pub name: client::Name,

    /// [`client::Email`] of the [`Client`], if known.
    pub email: Option<client::Email>,

    /// [`client::Phone`] of the [`Client`], if known.
    pub phone: Option<client::Phone>,

    /// [`client::Kind`] of the [`Client`].
    pub kind: client::Kind,

    /// [`client::Status`] of the [`Client`].
    pub status: client::Status,

    /// Lower bound of the budget, if any.
    pub budget_min: Option<Money>,

    /// Upper bound of the budget, if any.
    pub budget_max: Option<Money>,

    /// Preferred [`client::Location`]s.
    pub preferred_locations: Vec<client::Location>,

    /// Preferred [`property::Kind`]s.
    pub preferred_property_kinds: Vec<property::Kind>,

    /// [`client::Source`] of the [`Client`], if known.
    pub source: Option<client::Source>,

    /// [`client::Notes`] about the [`Client`].
    pub notes: client::Notes,
}

impl Attributes {
    /// Builds a [`Client`] with these [`Attributes`].
    fn into_client(
        self,
        id: client::Id,
        created_at: client::CreationDateTime,
    ) -> Client {
        let Self {
            name,
            email,
            phone,
            kind,
            status,
            budget_min,
            budget_max,
            preferred_locations,
            preferred_property_kinds,
            source,
            notes,
        } = self;
        Client {
            id,
            name,
            email,
            phone,
            kind,
            status,
            budget_min,
            budget_max,
            preferred_locations,
            preferred_property_kinds,
            source,
            notes,
            created_at,
        }
    }
}

/// [`Command`] for creating a new [`Client`].
#[derive(Clone, Debug, From)]
pub struct CreateClient(pub Attributes);

impl<Db> Command<CreateClient> for Service<Db>
where
    Db: Database<Insert<Client>, Err = Traced<database::Error>>,
{
    type Ok = Client;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        CreateClient(attrs): CreateClient,
    ) -> Result<Self::Ok, Self::Err> {
        let client =
            attrs.into_client(client::Id::new(), DateTime::now().coerce());

        self.database()
            .execute(Insert(client.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.invalidate(Invalidation::Client);
        Ok(client)
    }
}

/// [`Command`] for overwriting [`Attributes`] of an existing [`Client`].
#[derive(Clone, Debug)]
pub struct UpdateClient {
    /// ID of the [`Client`] to be updated.
    pub id: client::Id,

    /// New [`Attributes`] of the [`Client`].
    pub attributes: Attributes,
}

impl<Db> Command<UpdateClient> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Client, client::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Client>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateClient) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateClient { id, attributes } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Client`.
        tx.execute(Lock(By::<Client, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Client>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(id))
            .map_err(tracerr::wrap!())?;

        let client = attributes.into_client(id, existing.created_at);
        tx.execute(Update(client.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Client);
        Ok(client)
    }
}

/// Error of [`UpdateClient`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Client`] with the provided ID does not exist.
    #[display("`Client(id: {_0})` does not exist")]
    #[from(ignore)]
    ClientNotExists(#[error(not(source))] client::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
