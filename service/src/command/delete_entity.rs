//! [`Command`] for deleting an [`Entity`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{Entity, EntityKind},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an existing [`Entity`] of type `T`.
///
/// Entities referring to the deleted one are left intact.
#[derive(Clone, Copy, Debug)]
pub struct DeleteEntity<T: Entity> {
    /// ID of the [`Entity`] to be deleted.
    pub id: T::Id,
}

impl<T: Entity> DeleteEntity<T> {
    /// Creates a new [`DeleteEntity`] [`Command`] for the provided ID.
    #[must_use]
    pub fn new(id: T::Id) -> Self {
        Self { id }
    }
}

impl<Db, T> Command<DeleteEntity<T>> for Service<Db>
where
    T: Entity,
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<T>, T::Id>>,
            Ok = Option<T>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<T, T::Id>>, Err = Traced<database::Error>>
        + Database<Delete<By<T, T::Id>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = T;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteEntity { id }: DeleteEntity<T>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same entity.
        tx.execute(Lock(By::<T, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let entity = tx
            .execute(Select(By::<Option<T>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NotExists {
                kind: T::KIND,
                id: id.to_string(),
            })
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<T, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(T::KIND);
        Ok(entity)
    }
}

/// Error of [`DeleteEntity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Entity`] with the provided ID does not exist.
    #[display("`{kind}(id: {id})` does not exist")]
    #[from(ignore)]
    NotExists {
        /// [`EntityKind`] of the missing [`Entity`].
        kind: EntityKind,

        /// ID of the missing [`Entity`].
        id: String,
    },
}
