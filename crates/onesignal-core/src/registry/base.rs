//! Generic keyed registry.
//!
//! Shared storage for [`ToolRegistry`](super::ToolRegistry) and
//! [`ResourceRegistry`](super::ResourceRegistry). Items are trait objects
//! stored behind `Arc` and addressed by the id they report.

use dashmap::DashMap;
use std::sync::Arc;

use onesignal_protocols::ExtensionError;

/// Items that can be stored in a [`BaseRegistry`].
pub trait Registerable: Send + Sync {
    /// Unique identifier of the item (tool name, resource URI).
    fn registry_id(&self) -> &str;
}

/// Thread-safe registry keyed by [`Registerable::registry_id`].
pub struct BaseRegistry<T: ?Sized + Registerable> {
    items: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Registerable> BaseRegistry<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Register an item, rejecting a second item with the same id.
    pub fn register(&self, item: Arc<T>) -> Result<(), ExtensionError> {
        let id = item.registry_id().to_string();
        match self.items.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                Err(ExtensionError::AlreadyRegistered(entry.key().clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
        }
    }

    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ExtensionError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).map(|item| Arc::clone(item.value()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Registered ids in ascending order.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.items.iter().map(|item| item.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items ordered by id.
    ///
    /// `DashMap` iteration order is arbitrary; listings exposed to clients
    /// go through here so they are stable between calls.
    pub fn sorted(&self) -> Vec<Arc<T>> {
        let mut items: Vec<(String, Arc<T>)> = self
            .items
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items.into_iter().map(|(_, item)| item).collect()
    }
}

impl<T: ?Sized + Registerable> Default for BaseRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
