//! # Stash
//!
//! Hypermedia REST core for a personal belongings inventory.
//!
//! ## Features
//!
//! - **Query Pipeline**: `orderBy`, `search` and `offset`/`pageSize` applied to any entity source
//! - **Static Metadata**: each entity declares which fields sort and search, and how
//! - **Link Rewriting**: resources embed route references resolved to absolute URLs per response
//! - **Paged Envelopes**: `self`/`first`/`previous`/`next`/`last` navigation built from the page window
//! - **Cancellation**: a dropped request stops enumeration instead of finishing the page
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stash::prelude::*;
//!
//! let lamp = Asset::new("Desk lamp").with_value(40.0);
//!
//! let app = ServerBuilder::new()
//!     .with_config(StashConfig::default_config())
//!     .with_assets(InMemoryStore::with_entities([lamp]))
//!     .build()?;
//!
//! // GET /assets?orderBy=value desc&search=name co lamp&offset=0&pageSize=10
//! ```

pub mod config;
pub mod core;
pub mod inventory;
pub mod links;
pub mod query;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        ConfigError, Entity, EntitySource, FieldType, FieldValue, IntoResource, QueryError,
        Queryable, StashError, StashResult,
    };

    // === Query ===
    pub use crate::query::{
        CollectionQuery, ComparisonStrategy, MetadataRegistry, PageWindow, QueryField,
        QueryPipeline, QueryResult,
    };

    // === Links ===
    pub use crate::links::{
        Collection, Hypermedia, Link, LinkResolver, LinkRewriter, PagedCollection, RouteTable,
        SelfLink,
    };

    // === Inventory ===
    pub use crate::inventory::{
        Asset, AssetResource, Category, CategoryResource, Detail, DetailResource, RootResource,
        route_table,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::{PagingConfig, ServerConfig, StashConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, init_tracing};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use tokio_util::sync::CancellationToken;
    pub use uuid::Uuid;
}
