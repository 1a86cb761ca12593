use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Serializes sell admission per (owner, ticker).
///
/// The balance check and the conditional insert are two database operations;
/// without this, two concurrent sells can both read the same pre-sale balance
/// and both get admitted. Entries are created on first use and evicted with
/// the last guard, so the map only holds keys with a sell in flight.
#[derive(Clone)]
pub struct SellLocks {
    locks: Arc<DashMap<(Uuid, String), Arc<Mutex<()>>>>,
}

/// One held (owner, ticker) admission slot. Dropping it releases the mutex
/// and removes the map entry unless another task still holds or awaits it.
pub struct SellLockGuard {
    locks: Arc<DashMap<(Uuid, String), Arc<Mutex<()>>>>,
    key: (Uuid, String),
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SellLockGuard {
    fn drop(&mut self) {
        // Release the mutex (and its Arc) before counting references: one
        // remaining reference is the map's own, anything above that is a
        // holder or waiter.
        self.guard.take();
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl SellLocks {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Take the lock for one (owner, ticker). Hold the guard across the whole
    /// check-and-insert.
    pub async fn acquire(&self, user_id: Uuid, ticker: &str) -> SellLockGuard {
        let key = (user_id, ticker.to_string());
        let lock = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        SellLockGuard {
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
            key,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Default for SellLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn same_owner_and_ticker_contend() {
        let locks = SellLocks::new();
        let user = Uuid::new_v4();

        let guard = locks.acquire(user, "PETR4").await;
        let second = timeout(Duration::from_millis(50), locks.acquire(user, "PETR4")).await;
        assert!(second.is_err(), "second acquire should block while held");

        drop(guard);
        let reacquired = timeout(Duration::from_millis(50), locks.acquire(user, "PETR4")).await;
        assert!(reacquired.is_ok(), "lock should be free after release");
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = SellLocks::new();
        let user = Uuid::new_v4();

        let _petr = locks.acquire(user, "PETR4").await;
        let vale = timeout(Duration::from_millis(50), locks.acquire(user, "VALE3")).await;
        assert!(vale.is_ok(), "other tickers must not block");

        let other_user = timeout(
            Duration::from_millis(50),
            locks.acquire(Uuid::new_v4(), "PETR4"),
        )
        .await;
        assert!(other_user.is_ok(), "other owners must not block");
    }

    #[tokio::test]
    async fn released_entries_are_evicted() {
        let locks = SellLocks::new();
        let user = Uuid::new_v4();

        let petr = locks.acquire(user, "PETR4").await;
        let vale = locks.acquire(user, "VALE3").await;
        assert_eq!(locks.len(), 2);

        drop(petr);
        assert_eq!(locks.len(), 1, "uncontended entry should go with its guard");

        drop(vale);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn handoff_to_a_waiter_keeps_the_entry() {
        let locks = SellLocks::new();
        let user = Uuid::new_v4();

        let first = locks.acquire(user, "PETR4").await;

        let waiter = tokio::spawn({
            let locks = locks.clone();
            async move { locks.acquire(user, "PETR4").await }
        });
        tokio::task::yield_now().await;

        drop(first);
        let second = waiter.await.expect("waiter task panicked");
        assert_eq!(locks.len(), 1, "entry must survive while the waiter holds it");

        drop(second);
        assert_eq!(locks.len(), 0);
    }
}
