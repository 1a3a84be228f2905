//! Categories grouping assets

use crate::core::field::{FieldType, FieldValue};
use crate::core::{Entity, IntoResource, Queryable};
use crate::inventory::routes;
use crate::links::{Hypermedia, Link, LinkRewriter, SelfLink};
use crate::query::options::SEARCH;
use crate::query::{ComparisonStrategy, QueryField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

impl Entity for Category {
    fn resource_name() -> &'static str {
        "categories"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl Queryable for Category {
    fn query_fields() -> &'static [QueryField] {
        const FIELDS: &[QueryField] = &[
            QueryField::new("name", FieldType::String)
                .default_sort()
                .searchable(ComparisonStrategy::Text),
            QueryField::new("createdAt", FieldType::DateTime)
                .sortable()
                .searchable(ComparisonStrategy::Range),
        ];
        FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResource {
    #[serde(skip)]
    pub link: Link,

    #[serde(flatten)]
    pub self_link: SelfLink,

    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,

    /// Assets filed under this category
    pub assets: Link,
}

impl IntoResource for Category {
    type Resource = CategoryResource;

    fn to_resource(&self) -> CategoryResource {
        CategoryResource {
            link: Link::to(routes::CATEGORY).with_value(routes::CATEGORY_ID, self.id),
            self_link: SelfLink::default(),
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            assets: Link::to_collection(routes::ASSETS)
                .with_value(SEARCH, format!("categoryId eq {}", self.id)),
        }
    }
}

impl Hypermedia for CategoryResource {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite_self(&mut self.link, &mut self.self_link);
        self.assets.rewrite_links(rewriter);
    }
}
