//! Inventory resources served by the REST layer
//!
//! Assets optionally belong to a category and to a parent asset, and carry
//! any number of details.

pub mod asset;
pub mod category;
pub mod detail;

pub use asset::{Asset, AssetResource};
pub use category::{Category, CategoryResource};
pub use detail::{Detail, DetailResource};

use crate::core::error::ConfigError;
use crate::links::{Hypermedia, Link, LinkRewriter, RouteTable, SelfLink};
use serde::Serialize;

/// Route names and route value keys
pub mod routes {
    pub const ROOT: &str = "Root";
    pub const ASSETS: &str = "Assets";
    pub const ASSET: &str = "Asset";
    pub const ASSET_DETAILS: &str = "AssetDetails";
    pub const ASSET_DETAIL: &str = "AssetDetail";
    pub const CATEGORIES: &str = "Categories";
    pub const CATEGORY: &str = "Category";

    pub const ASSET_ID: &str = "assetId";
    pub const DETAIL_ID: &str = "detailId";
    pub const CATEGORY_ID: &str = "categoryId";
}

/// The routes every inventory link refers to, rooted at `base_url`
pub fn route_table(base_url: &str) -> Result<RouteTable, ConfigError> {
    Ok(RouteTable::new(base_url)?
        .route(routes::ROOT, "/")
        .route(routes::ASSETS, "/assets")
        .route(routes::ASSET, "/assets/{assetId}")
        .route(routes::ASSET_DETAILS, "/assets/{assetId}/details")
        .route(routes::ASSET_DETAIL, "/assets/{assetId}/details/{detailId}")
        .route(routes::CATEGORIES, "/categories")
        .route(routes::CATEGORY, "/categories/{categoryId}"))
}

/// Entry document linking to every top-level collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResource {
    #[serde(skip)]
    pub link: Link,

    #[serde(flatten)]
    pub self_link: SelfLink,

    pub assets: Link,
    pub categories: Link,
}

impl Default for RootResource {
    fn default() -> Self {
        Self {
            link: Link::to(routes::ROOT),
            self_link: SelfLink::default(),
            assets: Link::to_collection(routes::ASSETS),
            categories: Link::to_collection(routes::CATEGORIES),
        }
    }
}

impl Hypermedia for RootResource {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite_self(&mut self.link, &mut self.self_link);
        self.assets.rewrite_links(rewriter);
        self.categories.rewrite_links(rewriter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_document() {
        let table = route_table("https://inventory.example.com/api/").unwrap();
        let mut root = RootResource::default();
        LinkRewriter::new(&table).rewrite_graph(&mut root);

        assert_eq!(
            serde_json::to_value(&root).unwrap(),
            json!({
                "href": "https://inventory.example.com/api/",
                "assets": {
                    "href": "https://inventory.example.com/api/assets",
                    "rel": ["collection"],
                },
                "categories": {
                    "href": "https://inventory.example.com/api/categories",
                    "rel": ["collection"],
                },
            })
        );
    }

    #[test]
    fn test_every_route_is_declared() {
        let table = route_table("http://localhost/").unwrap();
        for name in [
            routes::ROOT,
            routes::ASSETS,
            routes::ASSET,
            routes::ASSET_DETAILS,
            routes::ASSET_DETAIL,
            routes::CATEGORIES,
            routes::CATEGORY,
        ] {
            assert!(table.contains(name), "{} is missing", name);
        }
    }
}
