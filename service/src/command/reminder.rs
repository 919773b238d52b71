//! [`Command`]s for scheduling and updating a [`Reminder`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, property, reminder, Reminder},
    infra::{database, Database},
    Invalidation, Service,
};

use super::Command;

/// Editable attributes of a [`Reminder`].
#[derive(Clone, Debug)]
pub struct Attributes {
    /// [`reminder::Title`] of the [`Reminder`].
    pub title: reminder::Title,

    /// [`reminder::Description`] of the [`Reminder`].
    pub description: reminder::Description,

    /// [`DateTime`] the [`Reminder`] is due at.
    pub due_at: reminder::DueDateTime,

    /// [`reminder::Kind`] of the [`Reminder`].
    pub kind: reminder::Kind,

    /// [`reminder::Priority`] of the [`Reminder`].
    pub priority: reminder::Priority,

    /// [`reminder::Status`] of the [`Reminder`].
    pub status: reminder::Status,

    /// ID of the [`Client`] the [`Reminder`] concerns, if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// ID of the [`Property`] the [`Reminder`] concerns, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,
}

impl Attributes {
    /// Builds a [`Reminder`] with these [`Attributes`].
    fn into_reminder(
        self,
        id: reminder::Id,
        created_at: reminder::CreationDateTime,
    ) -> Reminder {
        let Self {
            title,
            description,
            due_at,
            kind,
            priority,
            status,
            client_id,
            property_id,
        } = self;
        Reminder {
            id,
            title,
            description,
            due_at,
            kind,
            priority,
            status,
            client_id,
            property_id,
            created_at,
        }
    }
}

/// [`Command`] for scheduling a new [`Reminder`].
#[derive(Clone, Debug, From)]
pub struct CreateReminder(pub Attributes);

impl<Db> Command<CreateReminder> for Service<Db>
where
    Db: Database<Insert<Reminder>, Err = Traced<database::Error>>,
{
    type Ok = Reminder;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        CreateReminder(attrs): CreateReminder,
    ) -> Result<Self::Ok, Self::Err> {
        let reminder =
            attrs.into_reminder(reminder::Id::new(), DateTime::now().coerce());

        self.database()
            .execute(Insert(reminder.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.invalidate(Invalidation::Reminder);
        Ok(reminder)
    }
}

/// [`Command`] for overwriting [`Attributes`] of an existing [`Reminder`].
#[derive(Clone, Debug)]
pub struct UpdateReminder {
    /// ID of the [`Reminder`] to be updated.
    pub id: reminder::Id,

    /// New [`Attributes`] of the [`Reminder`].
    pub attributes: Attributes,
}

/// [`Command`] for changing a [`reminder::Status`] of an existing
/// [`Reminder`] (completing or dismissing it, for example).
#[derive(Clone, Copy, Debug)]
pub struct SetReminderStatus {
    /// ID of the [`Reminder`] to be updated.
    pub id: reminder::Id,

    /// New [`reminder::Status`] of the [`Reminder`].
    pub status: reminder::Status,
}

impl<Db> Command<UpdateReminder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reminder>, reminder::Id>>,
            Ok = Option<Reminder>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Reminder, reminder::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reminder;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateReminder,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateReminder { id, attributes } = cmd;
        self.modify_reminder(id, |existing| {
            attributes.into_reminder(id, existing.created_at)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<Db> Command<SetReminderStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reminder>, reminder::Id>>,
            Ok = Option<Reminder>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Reminder, reminder::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reminder;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetReminderStatus,
    ) -> Result<Self::Ok, Self::Err> {
        let SetReminderStatus { id, status } = cmd;
        self.modify_reminder(id, |existing| Reminder {
            status,
            ..existing
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<Db> Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reminder>, reminder::Id>>,
            Ok = Option<Reminder>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Reminder, reminder::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    /// Overwrites the existing [`Reminder`] with the result of the provided
    /// function in a single transaction.
    async fn modify_reminder(
        &self,
        id: reminder::Id,
        modify: impl FnOnce(Reminder) -> Reminder,
    ) -> Result<Reminder, Traced<ExecutionError>> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Reminder`.
        tx.execute(Lock(By::<Reminder, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Reminder>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReminderNotExists(id))
            .map_err(tracerr::wrap!())?;

        let reminder = modify(existing);
        tx.execute(Update(reminder.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Reminder);
        Ok(reminder)
    }
}

/// Error of [`UpdateReminder`] and [`SetReminderStatus`] [`Command`]s
/// execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Reminder`] with the provided ID does not exist.
    #[display("`Reminder(id: {_0})` does not exist")]
    #[from(ignore)]
    ReminderNotExists(#[error(not(source))] reminder::Id),
}
