//! Transaction management.
//!
//! A [`SqliteTransaction`] owns the store's connection lock from `BEGIN
//! IMMEDIATE` until `COMMIT` or `ROLLBACK`. Dropping the last handle of an
//! unfinished transaction rolls it back.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::OwnedMutexGuard;

use crate::error::{Error, Result};
use crate::store::{ReservationStore, StoreTransaction, TransactionalStore};
use crate::{Reservation, ReservationId};

use super::connection::{classify, SqliteStore};
use super::operations;

struct SqliteTxInner {
    conn: Mutex<Option<OwnedMutexGuard<Connection>>>,
    busy_timeout: Duration,
}

impl Drop for SqliteTxInner {
    fn drop(&mut self) {
        let slot = self.conn.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(conn) = slot.take() {
            log::warn!("transaction dropped without commit; rolling back");
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                log::error!("rollback on drop failed: {e}");
            }
        }
    }
}

/// Transaction handle for [`SqliteStore`].
///
/// # Examples
///
/// ```no_run
/// use reserva::database::{DatabaseConfig, SqliteStore};
/// use reserva::store::{ReservationStore, StoreTransaction, TransactionalStore};
/// use reserva::Reservation;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = SqliteStore::open(DatabaseConfig::new("/tmp/reserva.db")).unwrap();
/// let tx = store.begin().await.unwrap();
/// tx.delete_all().await.unwrap();
/// tx.create(Reservation::unsaved("Akash")).await.unwrap();
/// tx.commit().await.unwrap();
/// # });
/// ```
#[derive(Clone)]
pub struct SqliteTransaction {
    inner: Arc<SqliteTxInner>,
}

impl std::fmt::Debug for SqliteTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTransaction")
            .field("busy_timeout", &self.inner.busy_timeout)
            .finish_non_exhaustive()
    }
}

impl SqliteTransaction {
    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let slot = self
            .inner
            .conn
            .lock()
            .map_err(|_| Error::storage("transaction lock poisoned"))?;
        let conn = slot.as_deref().ok_or(Error::TransactionClosed)?;
        f(conn).map_err(|e| classify(e, self.inner.busy_timeout))
    }

    fn finish(&self, statement: &str) -> Result<()> {
        let conn = self
            .inner
            .conn
            .lock()
            .map_err(|_| Error::storage("transaction lock poisoned"))?
            .take()
            .ok_or(Error::TransactionClosed)?;

        if let Err(e) = conn.execute_batch(statement) {
            // A failed COMMIT leaves the transaction open; close it before
            // releasing the connection.
            if let Err(rollback_err) = conn.execute_batch("ROLLBACK") {
                log::error!("rollback after failed {statement} failed: {rollback_err}");
            }
            return Err(classify(e.into(), self.inner.busy_timeout));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionalStore for SqliteStore {
    type Transaction = SqliteTransaction;

    async fn begin(&self) -> Result<SqliteTransaction> {
        let conn = Arc::clone(&self.conn).lock_owned().await;
        let busy_timeout = self.config().busy_timeout;
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| classify(e.into(), busy_timeout))?;

        Ok(SqliteTransaction {
            inner: Arc::new(SqliteTxInner {
                conn: Mutex::new(Some(conn)),
                busy_timeout,
            }),
        })
    }
}

#[async_trait]
impl ReservationStore for SqliteTransaction {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        self.with_connection(|conn| operations::insert(conn, reservation))
    }

    async fn delete_all(&self) -> Result<usize> {
        self.with_connection(operations::delete_all)
    }

    async fn delete_by_id(&self, id: ReservationId) -> Result<bool> {
        self.with_connection(|conn| operations::delete_by_id(conn, id))
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.with_connection(|conn| operations::find_by_id(conn, id))
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        self.with_connection(operations::find_all)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Reservation>> {
        self.with_connection(|conn| operations::find_by_name(conn, name))
    }

    async fn count(&self) -> Result<usize> {
        self.with_connection(operations::count)
    }
}

#[async_trait]
impl StoreTransaction for SqliteTransaction {
    async fn commit(&self) -> Result<()> {
        self.finish("COMMIT")
    }

    async fn rollback(&self) -> Result<()> {
        self.finish("ROLLBACK")
    }
}
