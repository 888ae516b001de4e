//! Id-keyed entity storage
//!
//! Ids are handed out by the registry, never reused, and iteration always runs
//! in id order so a tick stays deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned collection of one entity kind
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<EntityId, T>,
    next_id: u32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id
    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Store an entity under a fresh id
    pub fn insert(&mut self, entity: T) -> EntityId {
        self.insert_with(|_| entity)
    }

    /// Store an entity that needs to know its own id
    pub fn insert_with(&mut self, make: impl FnOnce(EntityId) -> T) -> EntityId {
        let id = self.allocate();
        self.entries.insert(id, make(id));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(id, e)| (*id, e))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep entities for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &mut T) -> bool) {
        self.entries.retain(|id, e| keep(*id, e));
    }

    /// Drop every entity. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
