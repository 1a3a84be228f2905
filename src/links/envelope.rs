//! Collection envelopes and paging navigation links

use crate::links::link::Link;
use crate::links::rewriter::{Hypermedia, LinkRewriter};
use crate::query::options::{OFFSET, PAGE_SIZE, PageWindow};
use serde::Serialize;

/// An unpaged collection of embedded resources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub value: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new(self_link: Link, value: Vec<T>) -> Self {
        Self { self_link, value }
    }
}

impl<T: Hypermedia> Hypermedia for Collection<T> {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite(&mut self.self_link);
        self.value.rewrite_links(rewriter);
    }
}

/// One page of a collection plus first/previous/next/last navigation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedCollection<T> {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub first: Link,
    pub previous: Option<Link>,
    pub next: Option<Link>,
    pub last: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Total number of matching entities across all pages
    pub size: usize,

    pub value: Vec<T>,
}

impl<T> PagedCollection<T> {
    /// Build the envelope for one page
    ///
    /// Every navigation link copies the route and route values of
    /// `self_link`, only setting `offset` and `pageSize`. A zero page size
    /// produces no navigation links.
    pub fn build(self_link: Link, items: Vec<T>, total_size: usize, window: PageWindow) -> Self {
        let paging = window.complete().filter(|&(_, size)| size > 0);

        let last = window
            .page_size
            .filter(|&size| size > 0 && total_size > size)
            .map(|size| {
                let offset = (total_size - size).div_ceil(size) * size;
                page_link(&self_link, offset, size)
            });

        let next = paging
            .filter(|&(offset, size)| offset.saturating_add(size) < total_size)
            .map(|(offset, size)| page_link(&self_link, offset + size, size));

        let previous = paging.and_then(|(offset, size)| {
            if offset == 0 {
                None
            } else if offset > total_size {
                last.clone()
            } else {
                match offset.saturating_sub(size) {
                    0 => Some(self_link.clone()),
                    previous => Some(page_link(&self_link, previous, size)),
                }
            }
        });

        Self {
            first: self_link.clone(),
            self_link,
            previous,
            next,
            last,
            offset: window.offset,
            page_size: window.page_size,
            size: total_size,
            value: items,
        }
    }
}

fn page_link(self_link: &Link, offset: usize, page_size: usize) -> Link {
    self_link
        .clone()
        .with_value(OFFSET, offset)
        .with_value(PAGE_SIZE, page_size)
}

impl<T: Hypermedia> Hypermedia for PagedCollection<T> {
    fn rewrite_links(&mut self, rewriter: &LinkRewriter<'_>) {
        rewriter.rewrite(&mut self.self_link);
        rewriter.rewrite(&mut self.first);
        self.previous.rewrite_links(rewriter);
        self.next.rewrite_links(rewriter);
        self.last.rewrite_links(rewriter);
        self.value.rewrite_links(rewriter);
    }
}
