//! Static query metadata and the per-type metadata registry
//!
//! Every [`Queryable`] entity declares a table of [`QueryField`]s. The
//! [`MetadataRegistry`] resolves that table once per type into a
//! [`ResourceMetadata`] and memoizes it for the lifetime of the registry.

use crate::core::Queryable;
use crate::core::field::FieldType;
use crate::query::comparison::ComparisonStrategy;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Sort/search capabilities declared for one public field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryField {
    /// Public (resource) field name
    pub name: &'static str,

    /// Declared value type, used to coerce search literals
    pub field_type: FieldType,

    pub sortable: bool,

    /// Used for ordering when the client supplies no valid sort term
    pub default_sort: bool,

    /// `Some` when the field is searchable
    pub search: Option<ComparisonStrategy>,
}

impl QueryField {
    /// Declare a field with no capabilities
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            sortable: false,
            default_sort: false,
            search: None,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark as the default sort field (implies sortable)
    pub const fn default_sort(mut self) -> Self {
        self.sortable = true;
        self.default_sort = true;
        self
    }

    pub const fn searchable(mut self, strategy: ComparisonStrategy) -> Self {
        self.search = Some(strategy);
        self
    }

    pub fn is_searchable(&self) -> bool {
        self.search.is_some()
    }

    /// Comparison strategy, defaulting to equality-only
    pub fn strategy(&self) -> ComparisonStrategy {
        self.search.unwrap_or_default()
    }
}

/// Resolved query metadata of one entity type
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    resource: &'static str,
    fields: Vec<QueryField>,
}

impl ResourceMetadata {
    /// Inspect a type's declared fields, keeping those that are sortable or searchable
    pub fn resolve<E: Queryable>() -> Self {
        Self::from_fields(E::resource_name(), E::query_fields())
    }

    pub fn from_fields(resource: &'static str, fields: &[QueryField]) -> Self {
        Self {
            resource,
            fields: fields
                .iter()
                .filter(|f| f.sortable || f.is_searchable())
                .copied()
                .collect(),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn fields(&self) -> &[QueryField] {
        &self.fields
    }

    /// Find a sortable field by name (case-insensitive)
    pub fn sortable(&self, name: &str) -> Option<&QueryField> {
        self.fields
            .iter()
            .find(|f| f.sortable && f.name.eq_ignore_ascii_case(name))
    }

    /// Find a searchable field by name (case-insensitive)
    pub fn searchable(&self, name: &str) -> Option<&QueryField> {
        self.fields
            .iter()
            .find(|f| f.is_searchable() && f.name.eq_ignore_ascii_case(name))
    }

    /// Fields marked default-sort, in declaration order
    ///
    /// More than one is allowed; they chain as secondary keys.
    pub fn default_sort_fields(&self) -> impl Iterator<Item = &QueryField> {
        self.fields.iter().filter(|f| f.default_sort)
    }
}

/// Compute-once registry of [`ResourceMetadata`] keyed by entity type
///
/// Constructed explicitly and shared by reference (usually behind an `Arc`)
/// with every [`QueryPipeline`](crate::query::QueryPipeline).
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    entries: RwLock<HashMap<TypeId, Arc<ResourceMetadata>>>,
}

impl MetadataRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Eagerly resolve a type's metadata
    pub fn register<E: Queryable>(self) -> Self {
        self.resolve::<E>();
        self
    }

    /// Get a type's metadata, computing it on first use
    pub fn resolve<E: Queryable>(&self) -> Arc<ResourceMetadata> {
        let key = TypeId::of::<E>();

        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            if let Some(metadata) = entries.get(&key) {
                return metadata.clone();
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries
            .entry(key)
            .or_insert_with(|| {
                let metadata = ResourceMetadata::resolve::<E>();
                tracing::debug!(
                    resource = metadata.resource(),
                    fields = metadata.fields().len(),
                    "resolved query metadata"
                );
                Arc::new(metadata)
            })
            .clone()
    }

    /// Check whether a type's metadata has been resolved
    pub fn is_registered<E: Queryable>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&TypeId::of::<E>())
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entity;
    use crate::core::field::FieldValue;
    use uuid::Uuid;

    #[derive(Clone, Debug)]
    struct Lamp;

    impl Entity for Lamp {
        fn resource_name() -> &'static str {
            "lamps"
        }

        fn id(&self) -> Uuid {
            Uuid::nil()
        }

        fn field_value(&self, _field: &str) -> Option<FieldValue> {
            None
        }
    }

    impl Queryable for Lamp {
        fn query_fields() -> &'static [QueryField] {
            const FIELDS: &[QueryField] = &[
                QueryField::new("name", FieldType::String)
                    .default_sort()
                    .searchable(ComparisonStrategy::Text),
                QueryField::new("wattage", FieldType::Integer)
                    .sortable()
                    .searchable(ComparisonStrategy::Range),
                QueryField::new("serial", FieldType::String)
                    .searchable(ComparisonStrategy::Equality),
                QueryField::new("notes", FieldType::String),
            ];
            FIELDS
        }
    }

    #[test]
    fn test_resolve_drops_plain_fields() {
        let metadata = ResourceMetadata::resolve::<Lamp>();
        assert_eq!(metadata.resource(), "lamps");
        let names: Vec<_> = metadata.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "wattage", "serial"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let metadata = ResourceMetadata::resolve::<Lamp>();
        let sortable = metadata.sortable("WATTAGE").map(|f| f.name);
        let searchable = metadata.searchable("Serial").map(|f| f.name);
        assert_eq!(sortable, Some("wattage"));
        assert_eq!(searchable, Some("serial"));
    }

    #[test]
    fn test_capabilities_are_independent() {
        let metadata = ResourceMetadata::resolve::<Lamp>();
        assert!(metadata.sortable("serial").is_none());
        assert!(metadata.searchable("notes").is_none());
        assert!(metadata.sortable("notes").is_none());
    }

    #[test]
    fn test_default_sort_fields() {
        let metadata = ResourceMetadata::resolve::<Lamp>();
        let defaults: Vec<_> = metadata.default_sort_fields().map(|f| f.name).collect();
        assert_eq!(defaults, vec!["name"]);
    }

    #[test]
    fn test_strategy_defaults_to_equality() {
        let field = QueryField::new("code", FieldType::String);
        assert_eq!(field.strategy(), ComparisonStrategy::Equality);
    }

    #[test]
    fn test_registry_memoizes() {
        let registry = MetadataRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_registered::<Lamp>());

        let first = registry.resolve::<Lamp>();
        let second = registry.resolve::<Lamp>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_is_eager() {
        let registry = MetadataRegistry::new().register::<Lamp>();
        assert!(registry.is_registered::<Lamp>());
    }
}
