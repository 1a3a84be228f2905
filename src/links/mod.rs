//! Hypermedia links
//!
//! Resources embed unresolved [`Link`]s (route name plus route values). At
//! response time a [`LinkRewriter`] walks the resource tree through the
//! [`Hypermedia`] visitor and resolves every link into an absolute URL with a
//! [`LinkResolver`], usually a [`RouteTable`].

pub mod envelope;
pub mod link;
pub mod resolver;
pub mod rewriter;

pub use envelope::{Collection, PagedCollection};
pub use link::{Link, SelfLink};
pub use resolver::{LinkResolver, RouteTable, RouteTemplate};
pub use rewriter::{Hypermedia, LinkRewriter};
