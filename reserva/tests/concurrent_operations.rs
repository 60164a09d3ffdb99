//! Readers running alongside a transactional reload.
//!
//! A reader sharing the store with a reload must only ever see the contents
//! from before the reload or after it, never the cleared or half-filled
//! state in between.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{open_test_store, sorted, sorted_names, SEED};
use reserva::store::memory::MemoryStore;
use reserva::store::{ReservationStore, TransactionalStore};
use reserva::Reloader;

const OLD: [&str; 2] = ["Rajveer", "Surya"];

async fn run_reload_with_readers<S>(store: S)
where
    S: TransactionalStore + Clone + 'static,
{
    Reloader::new(OLD).run(&store).await.unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let old = sorted(&OLD);
    let new = sorted(&SEED);

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        let done = Arc::clone(&done);
        let (old, new) = (old.clone(), new.clone());
        readers.push(tokio::spawn(async move {
            loop {
                let finished = done.load(Ordering::SeqCst);
                let names = sorted_names(&store.find_all().await.unwrap());
                assert!(
                    names == old || names == new,
                    "observed intermediate state: {names:?}"
                );
                if finished {
                    return names;
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    tokio::task::yield_now().await;
    Reloader::new(SEED).run_transactional(&store).await.unwrap();
    done.store(true, Ordering::SeqCst);

    for reader in readers {
        assert_eq!(reader.await.unwrap(), new);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_readers_never_see_partial_reload() {
    let (_dir, store) = open_test_store();
    run_reload_with_readers(store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_readers_never_see_partial_reload() {
    run_reload_with_readers(MemoryStore::new()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_pipelines_assign_unique_ids() {
    let (_dir, store) = open_test_store();

    let mut tasks = Vec::new();
    for worker in 0..4 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let names: Vec<String> = (0..25).map(|i| format!("W{worker}n{i}")).collect();
            reserva::ReservationPipeline::default()
                .save_all_collected(&store, names)
                .await
                .unwrap()
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for task in tasks {
        for reservation in task.await.unwrap() {
            assert!(ids.insert(reservation.id().unwrap()));
        }
    }
    assert_eq!(ids.len(), 100);
    assert_eq!(store.count().await.unwrap(), 100);
}
