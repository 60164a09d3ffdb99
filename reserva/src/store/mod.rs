//! Storage capabilities for reservations.
//!
//! The [`ReservationStore`] trait is the small CRUD + query surface the
//! pipeline and reloader depend on. Backends that can group writes into an
//! all-or-nothing unit also implement [`TransactionalStore`], whose
//! transactions are themselves stores.
//!
//! ## Backends
//!
//! - [`crate::database::SqliteStore`]: durable, SQLite-backed
//! - [`memory::MemoryStore`]: in-process, for tests and dry runs
//!
//! ## Transactions
//!
//! [`transactional`] is the scoped primitive: it begins a transaction, hands
//! a handle to the body, commits if the body returns `Ok` and rolls back
//! otherwise. Dropping an unfinished transaction also rolls it back, so a
//! panic inside the body never leaves writes behind.

pub mod memory;

use std::future::Future;

use async_trait::async_trait;

use crate::error::Result;
use crate::{Reservation, ReservationId};

/// Async CRUD surface over reservation records.
///
/// Every method is atomic on its own. Grouping several calls into one
/// atomic unit requires a [`TransactionalStore`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Persists a new reservation and returns it with its assigned id.
    async fn create(&self, reservation: Reservation) -> Result<Reservation>;

    /// Deletes every reservation and returns how many were removed.
    async fn delete_all(&self) -> Result<usize>;

    /// Deletes one reservation by id. Returns false if it did not exist.
    async fn delete_by_id(&self, id: ReservationId) -> Result<bool>;

    /// Looks up one reservation by id.
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Returns every reservation, ordered by id.
    async fn find_all(&self) -> Result<Vec<Reservation>>;

    /// Returns every reservation with exactly this name, ordered by id.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Reservation>>;

    /// Returns the number of stored reservations.
    async fn count(&self) -> Result<usize>;
}

/// An open transaction.
///
/// Handles are cheap to clone; all clones share the same transaction. Once
/// committed or rolled back, every further call fails with
/// [`crate::Error::TransactionClosed`].
#[async_trait]
pub trait StoreTransaction: ReservationStore {
    /// Makes every write issued through this transaction visible.
    async fn commit(&self) -> Result<()>;

    /// Discards every write issued through this transaction.
    async fn rollback(&self) -> Result<()>;
}

/// A store that can open transactions.
#[async_trait]
pub trait TransactionalStore: ReservationStore {
    /// The transaction handle type.
    type Transaction: StoreTransaction + Clone + 'static;

    /// Opens a transaction.
    ///
    /// Other callers of the same store wait until the transaction finishes,
    /// so they never observe its intermediate state.
    async fn begin(&self) -> Result<Self::Transaction>;
}

/// Runs `body` inside a transaction on `store`.
///
/// Commits when the body returns `Ok`, rolls back when it returns `Err`.
/// The body's error is returned unchanged; a failure to roll back is logged
/// rather than masking it.
///
/// # Errors
///
/// Returns an error if the transaction cannot be opened or committed, or
/// whatever error the body returned.
///
/// # Examples
///
/// ```
/// use reserva::store::{memory::MemoryStore, transactional, ReservationStore};
/// use reserva::Reservation;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryStore::new();
///
/// let result: reserva::Result<()> = transactional(&store, |tx| async move {
///     tx.create(Reservation::unsaved("Akash")).await?;
///     Err(reserva::Error::storage("abort"))
/// })
/// .await;
///
/// assert!(result.is_err());
/// assert_eq!(store.count().await.unwrap(), 0);
/// # });
/// ```
pub async fn transactional<S, T, F, Fut>(store: &S, body: F) -> Result<T>
where
    S: TransactionalStore + ?Sized,
    F: FnOnce(S::Transaction) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let tx = store.begin().await?;
    log::debug!("transaction opened");

    match body(tx.clone()).await {
        Ok(value) => {
            tx.commit().await?;
            log::debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                log::error!("rollback after '{err}' failed: {rollback_err}");
            } else {
                log::debug!("transaction rolled back after: {err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_transactional_commits_on_ok() {
        let store = MemoryStore::new();

        let created = transactional(&store, |tx| async move {
            tx.create(Reservation::unsaved("Akash")).await
        })
        .await
        .unwrap();

        assert!(created.is_persisted());
        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_transactional_rolls_back_on_err() {
        let store = MemoryStore::new();
        store.create(Reservation::unsaved("Netra")).await.unwrap();

        let result: Result<()> = transactional(&store, |tx| async move {
            tx.delete_all().await?;
            tx.create(Reservation::unsaved("Megha")).await?;
            Err(Error::storage("abort"))
        })
        .await;

        assert!(matches!(result, Err(Error::Storage { .. })));
        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["Netra"]);
    }

    #[tokio::test]
    async fn test_handle_unusable_after_commit() {
        let store = MemoryStore::new();
        let tx = store.begin().await.unwrap();
        let leaked = tx.clone();
        tx.commit().await.unwrap();

        let err = leaked.count().await.unwrap_err();
        assert!(matches!(err, Error::TransactionClosed));
        assert!(matches!(
            leaked.commit().await.unwrap_err(),
            Error::TransactionClosed
        ));
    }
}
