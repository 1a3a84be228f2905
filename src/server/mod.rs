//! REST exposure of the inventory
//!
//! [`ServerBuilder`] wires entity sources, configuration, the metadata
//! registry and the route table into an axum `Router`.

pub mod builder;
pub mod handlers;
pub mod router;
pub mod telemetry;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_router;
pub use telemetry::init_tracing;
