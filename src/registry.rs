//! Named connection pool registry.
//!
//! [`Registry`] is the single access point for database pools in a
//! process: application code obtains a shared pool by short name instead
//! of threading a handle through every call site. The registry owns each
//! handle's lifecycle from [`Registry::open`] to [`Registry::destroy`];
//! callers must never close a handle obtained via [`Registry::get`].

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::driver::{Connector, PoolHandle, PoolStatistics};
use crate::error::{DriverError, RegistryError};

/// A registered pool together with its operational metadata.
#[derive(Debug)]
struct Entry<P> {
    pool: P,
    uri: String,
    opened_at: DateTime<Utc>,
}

/// Lightweight listing row for one registered pool.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    /// Registry name the pool is stored under.
    pub name: String,
    /// When the pool was opened.
    pub opened_at: DateTime<Utc>,
    /// Current connection counts.
    pub statistics: PoolStatistics,
}

/// Outcome of a bulk teardown.
///
/// Close failures do not abort the teardown: every entry is attempted
/// and per-name failures are collected here. `remaining` is re-read
/// after the teardown completes, so it is 0 unless another task
/// re-registered a name concurrently.
#[derive(Debug)]
pub struct TeardownReport {
    /// Number of entries registered when the teardown began.
    pub original: usize,
    /// Number of entries registered after the teardown finished.
    pub remaining: usize,
    /// Names whose pools reported a close failure. The names are
    /// unregistered regardless.
    pub failures: Vec<(String, DriverError)>,
}

impl TeardownReport {
    /// Returns `true` if every pool closed cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Process-wide store of named connection pools.
///
/// Construction is explicit — there is no hidden global. The hosting
/// application creates one registry at its composition root (typically
/// in an `Arc`) and injects it wherever pools are needed; tests inject a
/// registry over a fake [`Connector`].
///
/// # Concurrency
///
/// The name→pool map sits behind a single `tokio::sync::RwLock`, making
/// check-then-insert and remove-then-close race-free. Driver I/O (the
/// actual connect and close calls) always happens outside the lock, so a
/// slow backend never serializes operations on unrelated names.
///
/// # Error policy
///
/// [`Registry::get`] hard-fails on a missing name while
/// [`Registry::pool_statistics`] returns `None`. The asymmetry is
/// deliberate: functional call sites need the real handle and should
/// fail loudly, observability call sites should not crash on a typo.
#[derive(Debug)]
pub struct Registry<C: Connector> {
    connector: C,
    entries: RwLock<HashMap<String, Entry<C::Pool>>>,
}

impl<C: Connector> Registry<C> {
    /// Creates an empty registry over the given connector.
    #[must_use]
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a pool under `name`, or returns the existing one.
    ///
    /// If `name` is free the driver opens a pool for `uri` and the
    /// registry stores it. If `name` is already registered the existing
    /// handle is returned unchanged and **`uri` is ignored** — it is not
    /// validated against the URI the pool was opened with. This is a
    /// deliberate idempotency shortcut that can mask configuration
    /// drift; the registry logs a warning when the ignored URI differs
    /// from the one on record. Use [`Registry::open_strict`] when reuse
    /// must be an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Driver`] if the driver fails to open a
    /// pool; `name` stays unregistered in that case.
    pub async fn open(&self, name: &str, uri: &str) -> Result<C::Pool, RegistryError> {
        if let Some(existing) = self.reuse_existing(name, uri).await {
            return Ok(existing);
        }

        // Connect outside the lock; re-check under the write lock.
        let pool = self.connector.connect(uri).await?;
        let mut map = self.entries.write().await;
        match map.entry(name.to_string()) {
            MapEntry::Occupied(occupied) => {
                // Lost the open race: another task registered this name
                // while we were connecting. Keep theirs, discard ours.
                let winner = occupied.get().pool.clone();
                drop(map);
                self.discard(name, pool).await;
                Ok(winner)
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry {
                    pool: pool.clone(),
                    uri: uri.to_string(),
                    opened_at: Utc::now(),
                });
                tracing::info!(name, "connection pool registered");
                Ok(pool)
            }
        }
    }

    /// Opens a pool under `name`, failing if the name is taken.
    ///
    /// The existing handle is left untouched on failure and no new pool
    /// survives the call.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRegistration`] if `name` is
    /// already registered, or [`RegistryError::Driver`] if the driver
    /// fails to open a pool.
    pub async fn open_strict(&self, name: &str, uri: &str) -> Result<C::Pool, RegistryError> {
        if self.entries.read().await.contains_key(name) {
            return Err(RegistryError::DuplicateRegistration(name.to_string()));
        }

        let pool = self.connector.connect(uri).await?;
        let mut map = self.entries.write().await;
        match map.entry(name.to_string()) {
            MapEntry::Occupied(_) => {
                drop(map);
                self.discard(name, pool).await;
                Err(RegistryError::DuplicateRegistration(name.to_string()))
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry {
                    pool: pool.clone(),
                    uri: uri.to_string(),
                    opened_at: Utc::now(),
                });
                tracing::info!(name, "connection pool registered");
                Ok(pool)
            }
        }
    }

    /// Returns the pool registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if `name` is absent.
    pub async fn get(&self, name: &str) -> Result<C::Pool, RegistryError> {
        self.entries
            .read()
            .await
            .get(name)
            .map(|entry| entry.pool.clone())
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    /// Returns `true` if a pool is registered under `name`.
    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    /// Unregisters `name` and closes its pool.
    ///
    /// Idempotent: an unregistered `name` is a successful no-op. The
    /// entry is removed before the close runs, so `name` is free for
    /// re-registration even when the close reports a failure.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Driver`] if the driver cannot close the
    /// pool cleanly.
    pub async fn destroy(&self, name: &str) -> Result<(), RegistryError> {
        let removed = self.entries.write().await.remove(name);
        let Some(entry) = removed else {
            return Ok(());
        };
        entry.pool.close().await?;
        tracing::info!(name, "connection pool destroyed");
        Ok(())
    }

    /// Destroys every registered pool.
    ///
    /// Continue-and-aggregate: a close failure never aborts the
    /// teardown. Every entry is unregistered and its close attempted;
    /// failures are collected per name in the returned
    /// [`TeardownReport`].
    pub async fn destroy_all(&self) -> TeardownReport {
        let drained = std::mem::take(&mut *self.entries.write().await);
        let original = drained.len();

        let mut failures = Vec::new();
        for (name, entry) in drained {
            if let Err(err) = entry.pool.close().await {
                tracing::warn!(name, error = %err, "pool close failed during teardown");
                failures.push((name, err));
            }
        }

        let remaining = self.entries.read().await.len();
        tracing::info!(original, remaining, "registry teardown complete");
        TeardownReport {
            original,
            remaining,
            failures,
        }
    }

    /// Returns connection counts for `name`, or `None` if unregistered.
    ///
    /// Soft by design: a missing name is an empty answer, not an error
    /// (asymmetric with [`Registry::get`]).
    pub async fn pool_statistics(&self, name: &str) -> Option<PoolStatistics> {
        self.entries
            .read()
            .await
            .get(name)
            .map(|entry| entry.pool.statistics())
    }

    /// Returns the open-connection count for `name`, or `None` if
    /// unregistered.
    pub async fn open_connections(&self, name: &str) -> Option<u32> {
        self.pool_statistics(name)
            .await
            .map(|stats| stats.open_connections)
    }

    /// Returns the registered names, unordered.
    pub async fn names(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    /// Returns a listing row per registered pool, unordered.
    pub async fn entries(&self) -> Vec<EntrySummary> {
        let map = self.entries.read().await;
        map.iter()
            .map(|(name, entry)| EntrySummary {
                name: name.clone(),
                opened_at: entry.opened_at,
                statistics: entry.pool.statistics(),
            })
            .collect()
    }

    /// Returns the number of registered pools.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if no pool is registered.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Fast path for `open`: returns the existing handle under the read
    /// lock, warning when the caller supplied a different URI than the
    /// one the pool was opened with.
    async fn reuse_existing(&self, name: &str, uri: &str) -> Option<C::Pool> {
        let map = self.entries.read().await;
        let entry = map.get(name)?;
        if entry.uri != uri {
            tracing::warn!(name, "open() reused existing pool; supplied uri ignored");
        }
        Some(entry.pool.clone())
    }

    /// Closes a freshly opened pool that lost the open race. The caller
    /// never owned this handle, so a close failure is logged rather than
    /// surfaced.
    async fn discard(&self, name: &str, pool: C::Pool) {
        if let Err(err) = pool.close().await {
            tracing::warn!(name, error = %err, "failed to close pool discarded after open race");
        }
    }
}
