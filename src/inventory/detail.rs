//! Details: named attributes attached to an asset

use crate::core::field::{FieldType, FieldValue};
use crate::core::{Entity, IntoResource, Queryable};
use crate::inventory::asset::asset_link;
use crate::inventory::routes;
use crate::links::{Hypermedia, Link, LinkRewriter, SelfLink};
use crate::query::{ComparisonStrategy, QueryField};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub name: String,
    /// Free-form classification (e.g., "dimension", "warranty")
    pub kind: String,
    pub value: String,
}

impl Detail {
    pub fn new(
        asset_id: Uuid,
        name: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl Entity for Detail {
    fn resource_name() -> &'static str {
        "details"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "assetId" => Some(self.asset_id.into()),
            "name" => Some(self.name.as_str().into()),
            "kind" => Some(self.kind.as_str().into()),
            "value" => Some(self.value.as_str().into()),
            _ => None,
        }
    }
}

impl Queryable for Detail {
    fn query_fields() -> &'static [QueryField] {
        const FIELDS: &[QueryField] = &[
            QueryField::new("name", FieldType::String)
                .default_sort()
                .searchable(ComparisonStrategy::Equality),
            QueryField::new("kind", FieldType::String).searchable(ComparisonStrategy::Equality),
        ];
        FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResource {
    #[serde(skip)]
    pub link: Link,

    #[serde(flatten)]
    pub self_link: SelfLink,

    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub value: String,

    /// Back-reference to the owning asset, always a plain link
    pub asset: Link,
}

impl IntoResource for Detail {
    type Resource = DetailResource;

    fn to_resource(&self) -> DetailResource {
        DetailResource {
            link: Link::to(routes::ASSET_DETAIL)
                .with_value(routes::ASSET_ID, self.asset_id)
                .with_value(routes::DETAIL_ID, self.id),
            self_link: SelfLink::default(),
            id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            value: self.value.clone(),
            asset: asset_link(self.asset_id),
        }
    }
}

impl Hypermedia for DetailResource {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite_self(&mut self.link, &mut self.self_link);
        self.asset.rewrite_links(rewriter);
    }
}
