//! Service traits for entity sources

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to a sequence of entity records of a known shape
///
/// Implementations own persistence; the query pipeline only enumerates.
#[async_trait]
pub trait EntitySource<E: Entity>: Send + Sync {
    /// List all entities in the source's stable order
    async fn list(&self) -> Result<Vec<E>>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<E>>;
}

/// An already materialized sequence, used for scoped sub-collections
#[async_trait]
impl<E: Entity> EntitySource<E> for Vec<E> {
    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.clone())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<E>> {
        Ok(self.iter().find(|e| &e.id() == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[derive(Clone, Debug)]
    struct Note {
        id: Uuid,
    }

    impl Entity for Note {
        fn resource_name() -> &'static str {
            "notes"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, _field: &str) -> Option<FieldValue> {
            None
        }
    }

    #[tokio::test]
    async fn test_vec_source_get_and_list() {
        let first = Note { id: Uuid::new_v4() };
        let second = Note { id: Uuid::new_v4() };
        let source = vec![first.clone(), second.clone()];

        let listed = source.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);

        let found = source.get(&second.id).await.unwrap();
        assert_eq!(found.map(|n| n.id), Some(second.id));
        assert!(source.get(&Uuid::new_v4()).await.unwrap().is_none());
    }
}
