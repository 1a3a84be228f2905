//! In-place resolution of every link in a resource tree

use crate::links::link::{Link, SelfLink};
use crate::links::resolver::LinkResolver;
use axum::http::StatusCode;

/// A value that knows where its links and nested resources are
///
/// Resources implement this by hand, visiting each embedded [`Link`] and each
/// nested resource. Because resources are owned trees the walk always ends.
pub trait Hypermedia {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>);
}

impl Hypermedia for Link {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite(self);
    }
}

impl<T: Hypermedia> Hypermedia for Vec<T> {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        for item in self.iter_mut() {
            item.rewrite_links(rewriter);
        }
    }
}

impl<T: Hypermedia> Hypermedia for Option<T> {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        if let Some(inner) = self {
            inner.rewrite_links(rewriter);
        }
    }
}

impl<T: Hypermedia + ?Sized> Hypermedia for Box<T> {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        (**self).rewrite_links(rewriter);
    }
}

/// Resolves links through a [`LinkResolver`]
#[derive(Clone, Copy)]
pub struct LinkRewriter<'a> {
    resolver: &'a dyn LinkResolver,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(resolver: &'a dyn LinkResolver) -> Self {
        Self { resolver }
    }

    /// Resolve one link
    ///
    /// Links without a pending route name are left as they are. An
    /// unresolvable route leaves `href` null.
    pub fn rewrite(&self, link: &mut Link) {
        let Some(route_name) = link.route_name.take() else {
            return;
        };

        link.href = self.resolver.resolve(&route_name, &link.route_values);
        if link.href.is_none() {
            tracing::debug!(route = %route_name, "link route could not be resolved");
        }
    }

    /// Resolve a resource's own link and mirror it into its flat fields
    pub fn rewrite_self(&self, link: &mut Link, flat: &mut SelfLink) {
        self.rewrite(link);
        flat.copy_from(link);
    }

    /// Walk a whole resource tree
    pub fn rewrite_graph<T: Hypermedia + ?Sized>(&self, root: &mut T) {
        root.rewrite_links(self);
    }

    /// Rewrite a response payload
    ///
    /// Only `200 OK` and `201 Created` payloads are touched; error bodies
    /// and absent payloads pass through. Returns whether a rewrite happened.
    pub fn rewrite_response<T: Hypermedia + ?Sized>(
        &self,
        status: StatusCode,
        payload: Option<&mut T>,
    ) -> bool {
        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            return false;
        }

        match payload {
            Some(root) => {
                self.rewrite_graph(root);
                true
            }
            None => false,
        }
    }
}
