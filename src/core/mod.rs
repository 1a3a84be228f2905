//! Core module containing fundamental traits and types for the framework

pub mod entity;
pub mod error;
pub mod field;
pub mod service;

pub use entity::{Entity, IntoResource, Queryable};
pub use error::{ConfigError, QueryError, StashError, StashResult};
pub use field::{FieldType, FieldValue};
pub use service::EntitySource;
