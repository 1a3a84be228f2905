//! Assets: the main inventory records

use crate::core::field::{FieldType, FieldValue};
use crate::core::{Entity, IntoResource, Queryable};
use crate::inventory::detail::DetailResource;
use crate::inventory::routes;
use crate::links::{Collection, Hypermedia, Link, LinkRewriter, SelfLink};
use crate::query::options::SEARCH;
use crate::query::{ComparisonStrategy, QueryField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    /// Containing asset, if any
    pub parent_id: Option<Uuid>,
    pub value: Option<f64>,
    pub acquired_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_id: None,
            parent_id: None,
            value: None,
            acquired_on: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn acquired_on(mut self, date: DateTime<Utc>) -> Self {
        self.acquired_on = Some(date);
        self
    }
}

impl Entity for Asset {
    fn resource_name() -> &'static str {
        "assets"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "categoryId" => Some(self.category_id.into()),
            "parentId" => Some(self.parent_id.into()),
            "value" => Some(self.value.into()),
            "acquiredOn" => Some(self.acquired_on.into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl Queryable for Asset {
    fn query_fields() -> &'static [QueryField] {
        const FIELDS: &[QueryField] = &[
            QueryField::new("name", FieldType::String)
                .default_sort()
                .searchable(ComparisonStrategy::Text),
            QueryField::new("value", FieldType::Float)
                .sortable()
                .searchable(ComparisonStrategy::Range),
            QueryField::new("acquiredOn", FieldType::DateTime)
                .sortable()
                .searchable(ComparisonStrategy::Range),
            QueryField::new("createdAt", FieldType::DateTime)
                .sortable()
                .searchable(ComparisonStrategy::Range),
            QueryField::new("categoryId", FieldType::Uuid)
                .searchable(ComparisonStrategy::Equality),
            QueryField::new("parentId", FieldType::Uuid)
                .searchable(ComparisonStrategy::Equality),
        ];
        FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResource {
    #[serde(skip)]
    pub link: Link,

    #[serde(flatten)]
    pub self_link: SelfLink,

    pub id: Uuid,
    pub name: String,
    pub value: Option<f64>,
    pub acquired_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,

    pub category: Option<Link>,
    pub parent: Option<Link>,

    /// Assets contained in this one
    pub children: Link,

    pub details: Link,

    /// Embedded on single-asset responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_items: Option<Collection<DetailResource>>,
}

impl AssetResource {
    /// Embed this asset's details
    pub fn with_details(mut self, details: Vec<DetailResource>) -> Self {
        self.detail_items = Some(Collection::new(self.details.clone(), details));
        self
    }
}

pub fn asset_link(id: Uuid) -> Link {
    Link::to(routes::ASSET).with_value(routes::ASSET_ID, id)
}

impl IntoResource for Asset {
    type Resource = AssetResource;

    fn to_resource(&self) -> AssetResource {
        AssetResource {
            link: asset_link(self.id),
            self_link: SelfLink::default(),
            id: self.id,
            name: self.name.clone(),
            value: self.value,
            acquired_on: self.acquired_on,
            created_at: self.created_at,
            category: self
                .category_id
                .map(|id| Link::to(routes::CATEGORY).with_value(routes::CATEGORY_ID, id)),
            parent: self.parent_id.map(asset_link),
            children: Link::to_collection(routes::ASSETS)
                .with_value(SEARCH, format!("parentId eq {}", self.id)),
            details: Link::to_collection(routes::ASSET_DETAILS)
                .with_value(routes::ASSET_ID, self.id),
            detail_items: None,
        }
    }
}

impl Hypermedia for AssetResource {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite_self(&mut self.link, &mut self.self_link);
        self.category.rewrite_links(rewriter);
        self.parent.rewrite_links(rewriter);
        self.children.rewrite_links(rewriter);
        self.details.rewrite_links(rewriter);
        self.detail_items.rewrite_links(rewriter);
    }
}
