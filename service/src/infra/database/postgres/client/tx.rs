//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

use super::NonTx;

/// Transactional Postgres database client.
///
/// The transaction is opened lazily on the first executed statement.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to retrieve a [`Connection`] from.
    pool: connection::Pool,

    /// Shared state of this client.
    inner: Arc<Inner>,
}

/// Shared state of the [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// [`NonTx`] client which [`Connection`] may be reused for opening the
    /// transaction.
    origin: RwLock<Option<NonTx>>,

    /// Opened [`connection::Tx`], if any.
    tx: RwLock<Option<connection::Tx>>,
}

impl Tx {
    /// Creates a new [`Tx`] client originating from the provided [`NonTx`]
    /// client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool.clone(),
            inner: Arc::new(Inner {
                origin: RwLock::new(Some(client)),
                tx: RwLock::new(None),
            }),
        }
    }

    /// Acquires a [`connection::NonTx`] for opening the transaction in.
    ///
    /// [`Connection`] of the originating [`NonTx`] client is reused, if it
    /// has any.
    async fn acquire(
        &self,
    ) -> Result<connection::NonTx, Traced<database::Error>> {
        let origin = self.inner.origin.write().await.take();
        let reused = match origin {
            Some(client) => client.take_connection().await,
            None => None,
        };
        match reused {
            Some(conn) => Ok(conn),
            None => self
                .pool
                .get()
                .await
                .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                .map_err(tracerr::map_from),
        }
    }

    /// Returns the [`connection::Tx`] of this [`Tx`] client, opening it if
    /// required.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        let read = self.inner.tx.read().await;
        let guard = if read.is_some() {
            read
        } else {
            drop(read);

            let mut write = self.inner.tx.write().await;
            if write.is_none() {
                let conn = self.acquire().await.map_err(tracerr::wrap!())?;
                *write = Some(
                    connection::Tx::from_non_tx(conn)
                        .await
                        .map_err(tracerr::wrap!())?,
                );
            }
            write.downgrade()
        };

        Ok(RwLockReadGuard::map(guard, |tx| {
            tx.as_ref()
                .expect("connection cannot be dropped while guard is alive")
        }))
    }

    /// Commits the transaction of this [`Tx`] client.
    ///
    /// Nothing is done if no statement has been executed.
    ///
    /// # Errors
    ///
    /// If failed to commit the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.inner.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl_lazy_connection!(Tx);
