//! In-memory store implementation.
//!
//! This module provides [`MemoryStore`], an implementation of
//! [`ReservationStore`] and [`TransactionalStore`] that keeps records in a
//! `BTreeMap` behind an async mutex.
//!
//! ## Limitations
//!
//! - **No persistence**: all state is lost when the store is dropped
//! - **Single-process only**: state is not shared across process boundaries
//!
//! A transaction holds the store's lock for its whole lifetime and keeps a
//! snapshot of the state taken at `begin`; rolling back restores it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::{ReservationStore, StoreTransaction, TransactionalStore};
use crate::error::{Error, Result};
use crate::{Reservation, ReservationId};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    records: BTreeMap<ReservationId, Reservation>,
    last_id: i64,
}

impl MemoryState {
    fn create(&mut self, reservation: Reservation) -> Result<Reservation> {
        if let Some(id) = reservation.id() {
            return Err(Error::storage(format!(
                "reservation {id} is already persisted"
            )));
        }
        self.last_id += 1;
        let id = ReservationId::from(self.last_id);
        let saved = reservation.with_id(id);
        self.records.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    fn delete_by_id(&mut self, id: ReservationId) -> bool {
        self.records.remove(&id).is_some()
    }

    fn find_by_id(&self, id: ReservationId) -> Option<Reservation> {
        self.records.get(&id).cloned()
    }

    fn find_all(&self) -> Vec<Reservation> {
        self.records.values().cloned().collect()
    }

    fn find_by_name(&self, name: &str) -> Vec<Reservation> {
        self.records
            .values()
            .filter(|r| r.name() == name)
            .cloned()
            .collect()
    }
}

/// Call accounting and failure injection shared by a store and its
/// transactions.
#[derive(Debug, Default)]
struct Probe {
    calls: AtomicUsize,
    creates: AtomicUsize,
    fail_create_after: Option<usize>,
}

impl Probe {
    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_create(&self) -> Result<()> {
        let attempt = self.creates.fetch_add(1, Ordering::SeqCst);
        match self.fail_create_after {
            Some(limit) if attempt >= limit => Err(Error::storage(format!(
                "injected failure on create #{}",
                attempt + 1
            ))),
            _ => Ok(()),
        }
    }
}

/// In-memory reservation store.
///
/// # Examples
///
/// ```
/// use reserva::store::{memory::MemoryStore, ReservationStore};
/// use reserva::Reservation;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// let saved = store.create(Reservation::unsaved("Mahee")).await.unwrap();
/// assert!(saved.is_persisted());
/// assert_eq!(store.find_by_name("Mahee").await.unwrap(), vec![saved]);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<AsyncMutex<MemoryState>>,
    probe: Arc<Probe>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(AsyncMutex::new(MemoryState::default())),
            probe: Arc::new(Probe::default()),
        }
    }

    /// Creates an empty store whose creates fail once `successful` creates
    /// have been attempted.
    ///
    /// Use this to exercise failure paths part way through a batch.
    #[must_use]
    pub fn with_failing_create(successful: usize) -> Self {
        Self {
            state: Arc::new(AsyncMutex::new(MemoryState::default())),
            probe: Arc::new(Probe {
                fail_create_after: Some(successful),
                ..Probe::default()
            }),
        }
    }

    /// Returns how many store operations have been issued, including those
    /// issued through transactions.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.probe.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        self.probe.record_call();
        self.probe.check_create()?;
        self.state.lock().await.create(reservation)
    }

    async fn delete_all(&self) -> Result<usize> {
        self.probe.record_call();
        Ok(self.state.lock().await.delete_all())
    }

    async fn delete_by_id(&self, id: ReservationId) -> Result<bool> {
        self.probe.record_call();
        Ok(self.state.lock().await.delete_by_id(id))
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.probe.record_call();
        Ok(self.state.lock().await.find_by_id(id))
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        self.probe.record_call();
        Ok(self.state.lock().await.find_all())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Reservation>> {
        self.probe.record_call();
        Ok(self.state.lock().await.find_by_name(name))
    }

    async fn count(&self) -> Result<usize> {
        self.probe.record_call();
        Ok(self.state.lock().await.records.len())
    }
}

#[async_trait]
impl TransactionalStore for MemoryStore {
    type Transaction = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let snapshot = guard.clone();
        Ok(MemoryTransaction {
            inner: Arc::new(MemoryTxInner {
                open: Mutex::new(Some(OpenTx { guard, snapshot })),
                probe: Arc::clone(&self.probe),
            }),
        })
    }
}

struct OpenTx {
    guard: OwnedMutexGuard<MemoryState>,
    snapshot: MemoryState,
}

impl OpenTx {
    fn restore(mut self) {
        *self.guard = self.snapshot;
    }
}

struct MemoryTxInner {
    open: Mutex<Option<OpenTx>>,
    probe: Arc<Probe>,
}

impl Drop for MemoryTxInner {
    fn drop(&mut self) {
        let slot = self.open.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(open) = slot.take() {
            log::warn!("in-memory transaction dropped without commit; rolling back");
            open.restore();
        }
    }
}

/// Transaction handle for [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryTransaction {
    inner: Arc<MemoryTxInner>,
}

impl std::fmt::Debug for MemoryTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTransaction").finish_non_exhaustive()
    }
}

impl MemoryTransaction {
    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> Result<T>) -> Result<T> {
        self.inner.probe.record_call();
        let mut slot = self
            .inner
            .open
            .lock()
            .map_err(|_| Error::storage("transaction lock poisoned"))?;
        let open = slot.as_mut().ok_or(Error::TransactionClosed)?;
        f(&mut *open.guard)
    }

    fn finish(&self) -> Result<OpenTx> {
        let mut slot = self
            .inner
            .open
            .lock()
            .map_err(|_| Error::storage("transaction lock poisoned"))?;
        slot.take().ok_or(Error::TransactionClosed)
    }
}

#[async_trait]
impl ReservationStore for MemoryTransaction {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        self.with_state(|state| {
            self.inner.probe.check_create()?;
            state.create(reservation)
        })
    }

    async fn delete_all(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.delete_all()))
    }

    async fn delete_by_id(&self, id: ReservationId) -> Result<bool> {
        self.with_state(|state| Ok(state.delete_by_id(id)))
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.with_state(|state| Ok(state.find_by_id(id)))
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        self.with_state(|state| Ok(state.find_all()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Reservation>> {
        self.with_state(|state| Ok(state.find_by_name(name)))
    }

    async fn count(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.records.len()))
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn commit(&self) -> Result<()> {
        // Dropping the guard publishes the mutated state.
        drop(self.finish()?);
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.finish()?.restore();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Reservation]) -> Vec<&str> {
        records.iter().map(Reservation::name).collect()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.create(Reservation::unsaved("Akash")).await.unwrap();
        let b = store.create(Reservation::unsaved("Shikha")).await.unwrap();
        assert!(a.id().unwrap() < b.id().unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_persisted() {
        let store = MemoryStore::new();
        let saved = store.create(Reservation::unsaved("Akash")).await.unwrap();
        let err = store.create(saved).await.unwrap_err();
        assert!(err.is_store_error());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete_all() {
        let store = MemoryStore::new();
        let first = store.create(Reservation::unsaved("Akash")).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 1);
        let second = store.create(Reservation::unsaved("Akash")).await.unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_find_by_name_returns_duplicates() {
        let store = MemoryStore::new();
        store.create(Reservation::unsaved("Mahee")).await.unwrap();
        store.create(Reservation::unsaved("Surya")).await.unwrap();
        store.create(Reservation::unsaved("Mahee")).await.unwrap();

        let found = store.find_by_name("Mahee").await.unwrap();
        assert_eq!(names(&found), vec!["Mahee", "Mahee"]);
        assert!(store.find_by_name("mahee").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_and_find_by_id() {
        let store = MemoryStore::new();
        let saved = store.create(Reservation::unsaved("Netra")).await.unwrap();
        let id = saved.id().unwrap();

        assert_eq!(store.find_by_id(id).await.unwrap(), Some(saved));
        assert!(store.delete_by_id(id).await.unwrap());
        assert!(!store.delete_by_id(id).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap(), None);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failing_create() {
        let store = MemoryStore::with_failing_create(1);
        store.create(Reservation::unsaved("Akash")).await.unwrap();
        let err = store.create(Reservation::unsaved("Shikha")).await.unwrap_err();
        assert!(err.to_string().contains("injected failure on create #2"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_call_count() {
        let store = MemoryStore::new();
        assert_eq!(store.call_count(), 0);
        store.find_all().await.unwrap();
        store.count().await.unwrap();
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transaction_rollback_restores_snapshot() {
        let store = MemoryStore::new();
        store.create(Reservation::unsaved("Rajveer")).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.delete_all().await.unwrap();
        tx.create(Reservation::unsaved("Megha")).await.unwrap();
        assert_eq!(names(&tx.find_all().await.unwrap()), vec!["Megha"]);
        tx.rollback().await.unwrap();

        assert_eq!(names(&store.find_all().await.unwrap()), vec!["Rajveer"]);
    }

    #[tokio::test]
    async fn test_transaction_commit_publishes() {
        let store = MemoryStore::new();
        let tx = store.begin().await.unwrap();
        tx.create(Reservation::unsaved("Surya")).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(names(&store.find_all().await.unwrap()), vec!["Surya"]);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = MemoryStore::new();
        {
            let tx = store.begin().await.unwrap();
            tx.create(Reservation::unsaved("Ayana")).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_readers_wait_for_transaction() {
        let store = MemoryStore::new();
        store.create(Reservation::unsaved("Akash")).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.delete_all().await.unwrap();

        // The half-cleared state must not be observable from outside.
        let reader = store.clone();
        let pending = tokio::spawn(async move { reader.count().await });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        tx.create(Reservation::unsaved("Shikha")).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(pending.await.unwrap().unwrap(), 1);
    }
}
