//! Persistence gateway: JSON values under namespaced keys.
//!
//! Storage failures never reach the caller. A failed write is reported once
//! through the notifier and the key drops to memory-only for the rest of the
//! session; the in-memory state stays authoritative.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::notify::{Notifier, Severity};
use crate::storage::{KeyValueStore, StorageError};

/// Whether a key's latest state reached the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    Persistent,
    MemoryOnly,
}

pub struct PersistenceGateway<S> {
    store: S,
    prefix: String,
    notifier: Arc<dyn Notifier>,
    memory_only: HashSet<String>,
}

impl<S: core::fmt::Debug> core::fmt::Debug for PersistenceGateway<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("store", &self.store)
            .field("prefix", &self.prefix)
            .field("memory_only", &self.memory_only)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S, prefix: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            notifier,
            memory_only: HashSet::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full key as written to the store (`<prefix>:<key>`).
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    pub fn durability(&self, key: &str) -> Durability {
        if self.memory_only.contains(key) {
            Durability::MemoryOnly
        } else {
            Durability::Persistent
        }
    }

    /// Read and decode `key`, or `fallback` when it is absent, unreadable or corrupt.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let full_key = self.namespaced(key);
        match self.try_get(&full_key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                tracing::warn!(key = %full_key, error = %err, "failed to load persisted value; using fallback");
                fallback
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, full_key: &str) -> Result<Option<T>, StorageError> {
        match self.store.read(full_key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Overwrite `key` with the full encoded `value`.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Durability {
        if self.memory_only.contains(key) {
            tracing::debug!(key, "key is memory-only; skipping write");
            return Durability::MemoryOnly;
        }

        let full_key = self.namespaced(key);
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.write(&full_key, &raw));

        match result {
            Ok(()) => {
                tracing::debug!(key = %full_key, "persisted");
                Durability::Persistent
            }
            Err(err) => {
                tracing::warn!(key = %full_key, error = %err, "failed to persist; continuing in memory only");
                self.memory_only.insert(key.to_string());
                self.notifier.notify(
                    &format!("Could not save your {key}; changes will be kept until you close the page"),
                    Severity::Error,
                );
                Durability::MemoryOnly
            }
        }
    }
}
