//! Entity traits defining the seam between stored records and the query pipeline

use crate::core::field::FieldValue;
use crate::query::metadata::QueryField;
use uuid::Uuid;

/// Base trait for all entities handed to the query pipeline.
///
/// An entity is the internal record shape held by the entity source. The
/// pipeline never sees concrete field types: it reads values by their public
/// name through [`Entity::field_value`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "assets", "categories")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the value of a field by its public (resource) name
    ///
    /// Returns `None` when the entity has no such field.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// Entities whose collections can be sorted and searched.
///
/// The metadata table is static and declared next to the type; it replaces
/// any runtime discovery of sortable/searchable fields.
///
/// ```rust,ignore
/// impl Queryable for Category {
///     fn query_fields() -> &'static [QueryField] {
///         const FIELDS: &[QueryField] = &[
///             QueryField::new("name", FieldType::String)
///                 .default_sort()
///                 .searchable(ComparisonStrategy::Text),
///         ];
///         FIELDS
///     }
/// }
/// ```
pub trait Queryable: Entity {
    /// Declared sort/search capabilities of this entity's public fields
    fn query_fields() -> &'static [QueryField];
}

/// Mapping from an entity to its externally-visible resource
pub trait IntoResource {
    type Resource;

    /// Build the resource, embedding unresolved route references
    fn to_resource(&self) -> Self::Resource;
}
