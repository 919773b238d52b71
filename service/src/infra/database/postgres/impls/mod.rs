//! [`Database`] implementations.

#![allow(
    clippy::items_after_statements,
    reason = "`const SQL` after statements"
)]
#![allow(clippy::too_many_lines, reason = "SQL-related code a bit verbose")]

/// Implements [`Lock`]ing and [`Delete`]ing of an entity stored in the
/// provided table by its ID.
///
/// [`Delete`]: common::operations::Delete
/// [`Lock`]: common::operations::Lock
macro_rules! impl_by_id {
    ($entity:ty, $id:ty, $table:literal) => {
        impl<C> crate::infra::Database<
            common::operations::Lock<common::operations::By<$entity, $id>>,
        > for crate::infra::database::Postgres<C>
        where
            C: crate::infra::database::postgres::Connection,
        {
            type Ok = ();
            type Err = tracerr::Traced<crate::infra::database::Error>;

            async fn execute(
                &self,
                common::operations::Lock(by): common::operations::Lock<
                    common::operations::By<$entity, $id>,
                >,
            ) -> Result<Self::Ok, Self::Err> {
                // Avoid subtle change for SQL.
                let id: $id = by.into_inner();

                const SQL: &str = concat!(
                    "SELECT id FROM ",
                    $table,
                    " WHERE id = $1::UUID FOR UPDATE",
                );
                self.query(SQL, &[&id])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
        }

        impl<C> crate::infra::Database<
            common::operations::Delete<common::operations::By<$entity, $id>>,
        > for crate::infra::database::Postgres<C>
        where
            C: crate::infra::database::postgres::Connection,
        {
            type Ok = ();
            type Err = tracerr::Traced<crate::infra::database::Error>;

            async fn execute(
                &self,
                common::operations::Delete(by): common::operations::Delete<
                    common::operations::By<$entity, $id>,
                >,
            ) -> Result<Self::Ok, Self::Err> {
                // Avoid subtle change for SQL.
                let id: $id = by.into_inner();

                const SQL: &str =
                    concat!("DELETE FROM ", $table, " WHERE id = $1::UUID");
                self.exec(SQL, &[&id])
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)
            }
        }
    };
}

mod client;
mod commission;
mod interaction;
mod property;
mod reminder;

use async_trait::async_trait;
use common::operations::{Commit, Transact};
use refinery_core::{
    traits::r#async::{AsyncQuery, AsyncTransaction},
    AsyncMigrate, Migration,
};
use tracerr::Traced;

use crate::infra::{database, postgres, Database};

use super::{NonTx, Postgres, Tx};

impl Database<Transact> for Postgres<NonTx> {
    type Ok = Postgres<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Postgres(Tx::from_non_tx(self.0.clone())))
    }
}

impl Database<Transact> for Postgres<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Postgres<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.commit().await.map_err(tracerr::wrap!())
    }
}

#[async_trait]
impl AsyncTransaction for Postgres {
    type Error = Traced<database::Error>;

    async fn execute(
        &mut self,
        queries: &[&str],
    ) -> Result<usize, Self::Error> {
        let mut conn = self
            .0
            .pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        AsyncTransaction::execute(&mut **conn, queries)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

#[async_trait]
impl AsyncQuery<Vec<Migration>> for Postgres {
    async fn query(
        &mut self,
        query: &str,
    ) -> Result<Vec<Migration>, <Self as AsyncTransaction>::Error> {
        let mut conn = self
            .0
            .pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        AsyncQuery::query(&mut **conn, query)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl AsyncMigrate for Postgres {}
