//! In-memory entity source for testing and development

use crate::core::{Entity, EntitySource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory entity store
///
/// Enumerates in insertion order. Uses RwLock for thread-safe access;
/// clones share the same records.
#[derive(Debug)]
pub struct InMemoryStore<E> {
    entities: Arc<RwLock<IndexMap<Uuid, E>>>,
}

impl<E> Clone for InMemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
        }
    }
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with entities, in the given order
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let map = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            entities: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace an entity; a replaced entity keeps its position
    pub fn insert(&self, entity: E) -> Result<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.insert(entity.id(), entity);
        Ok(())
    }

    /// Remove an entity, keeping the order of the others
    pub fn remove(&self, id: &Uuid) -> Result<Option<E>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.shift_remove(id))
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<E: Entity> EntitySource<E> for InMemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }
}
