// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

const DEFAULT_CAPACITY: usize = 64;

/// Shares one computation between concurrent or repeated requests for the same key.
///
/// The first caller for a key runs the computation; callers arriving meanwhile wait for its
/// result, and later callers get the cached value until [`RequestCoalescer::clear`] is called.
/// Failed computations are not cached, so the next caller retries.
#[derive(Debug)]
pub struct RequestCoalescer<K, V> {
    slots: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
    capacity: usize,
}

impl<K, V> RequestCoalescer<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a coalescer keeping at most `capacity` keys; the map is reset when full.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Returns the value for `key`, computing it with `f` if no one has yet.
    pub async fn get_or_try_init<F, Fut, E>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut slots = self.slots.lock().await;
            if !slots.contains_key(&key) && slots.len() >= self.capacity {
                tracing::debug!(capacity = self.capacity, "request cache full, resetting");
                slots.clear();
            }
            slots.entry(key).or_default().clone()
        };

        cell.get_or_try_init(f).await.cloned()
    }

    /// Drops every cached value.
    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Number of keys currently tracked.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Default for RequestCoalescer<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn computes_once_per_key() {
        let coalescer = RequestCoalescer::<&str, usize>::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let v = coalescer
                .get_or_try_init("week", || async {
                    Ok::<_, String>(calls.fetch_add(1, Ordering::SeqCst) + 10)
                })
                .await
                .unwrap();
            assert_eq!(v, 10);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_result() {
        let coalescer = Arc::new(RequestCoalescer::<u8, usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let coalescer = coalescer.clone();
                let calls = calls.clone();
                tokio::spawn(async move {
                    coalescer
                        .get_or_try_init(1, || async move {
                            tokio::task::yield_now().await;
                            Ok::<_, String>(calls.fetch_add(1, Ordering::SeqCst))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok(0));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let coalescer = RequestCoalescer::<&str, usize>::new();

        let err = coalescer
            .get_or_try_init("k", || async { Err::<usize, _>("boom".to_string()) })
            .await;
        assert_eq!(err, Err("boom".to_string()));

        let ok = coalescer
            .get_or_try_init("k", || async { Ok::<_, String>(7) })
            .await;
        assert_eq!(ok, Ok(7));
    }

    #[tokio::test]
    async fn clear_and_capacity_reset() {
        let coalescer = RequestCoalescer::<u8, u8>::with_capacity(2);
        for k in 0..2 {
            coalescer.get_or_try_init(k, || async move { Ok::<_, ()>(k) }).await.unwrap();
        }
        assert_eq!(coalescer.len().await, 2);

        coalescer.get_or_try_init(9, || async { Ok::<_, ()>(9) }).await.unwrap();
        assert_eq!(coalescer.len().await, 1);

        coalescer.clear().await;
        assert!(coalescer.is_empty().await);
    }
}
