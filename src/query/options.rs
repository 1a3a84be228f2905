//! Client-supplied sort, search and paging options

use crate::config::PagingConfig;
use crate::core::Entity;
use crate::core::error::QueryError;
use crate::query::expression::QueryPlan;
use crate::query::metadata::ResourceMetadata;
use crate::query::terms::{SearchTerm, SortTerm, parse_search_terms, parse_sort_terms};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query-string keys understood by the pipeline
pub const ORDER_BY: &str = "orderBy";
pub const SEARCH: &str = "search";
pub const OFFSET: &str = "offset";
pub const PAGE_SIZE: &str = "pageSize";

/// Raw `orderBy` values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub order_by: Vec<String>,
}

impl SortOptions {
    pub fn new(order_by: Vec<String>) -> Self {
        Self { order_by }
    }

    /// Every parsed term, usable or not
    pub fn all_terms(&self) -> impl Iterator<Item = SortTerm> + '_ {
        parse_sort_terms(&self.order_by)
    }

    /// Terms naming a sortable field, with the declared field name
    ///
    /// Unknown fields are dropped. When nothing usable remains, the
    /// metadata's default-sort fields are returned (ascending, `is_default`).
    pub fn valid_terms(&self, metadata: &ResourceMetadata) -> Vec<SortTerm> {
        let terms: Vec<SortTerm> = self
            .all_terms()
            .filter_map(|term| match metadata.sortable(&term.name) {
                Some(field) => Some(SortTerm {
                    name: field.name.to_string(),
                    ..term
                }),
                None => {
                    tracing::debug!(
                        resource = metadata.resource(),
                        field = %term.name,
                        "dropping sort term on unknown field"
                    );
                    None
                }
            })
            .collect();

        if !terms.is_empty() {
            return terms;
        }

        metadata
            .default_sort_fields()
            .map(|field| SortTerm {
                name: field.name.to_string(),
                descending: false,
                is_default: true,
            })
            .collect()
    }

    /// Stable sort by the valid terms
    pub fn apply<E: Entity>(&self, mut items: Vec<E>, metadata: &ResourceMetadata) -> Vec<E> {
        let plan = QueryPlan {
            predicates: Vec::new(),
            ordering: QueryPlan::ordering(self, metadata),
        };
        plan.order(&mut items);
        items
    }
}

/// Raw `search` values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub search: Vec<String>,
}

impl SearchOptions {
    pub fn new(search: Vec<String>) -> Self {
        Self { search }
    }

    /// Every parsed term, including those with invalid syntax
    pub fn all_terms(&self) -> impl Iterator<Item = SearchTerm> + '_ {
        parse_search_terms(&self.search)
    }

    /// Terms with valid syntax naming a searchable field
    ///
    /// The returned terms carry the declared field name and its comparer.
    /// Operators are not checked here; see
    /// [`QueryPlan::build`](crate::query::expression::QueryPlan::build).
    pub fn valid_terms(&self, metadata: &ResourceMetadata) -> Vec<SearchTerm> {
        self.all_terms()
            .filter(|term| term.valid_syntax)
            .filter_map(|term| match metadata.searchable(&term.name) {
                Some(field) => Some(SearchTerm {
                    name: field.name.to_string(),
                    comparer: Some(field.strategy()),
                    ..term
                }),
                None => {
                    tracing::debug!(
                        resource = metadata.resource(),
                        field = %term.name,
                        "dropping search term on unknown field"
                    );
                    None
                }
            })
            .collect()
    }

    /// Keep the entities matching every valid term
    ///
    /// Nothing is filtered when any term is invalid.
    pub fn apply<E: Entity>(
        &self,
        items: Vec<E>,
        metadata: &ResourceMetadata,
    ) -> Result<Vec<E>, QueryError> {
        let plan = QueryPlan {
            predicates: QueryPlan::predicates(self, metadata)?,
            ordering: Vec::new(),
        };
        Ok(items.into_iter().filter(|e| plan.matches(e)).collect())
    }
}

/// The offset/pageSize pair defining a slice of a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    #[validate(range(max = 10000))]
    pub offset: Option<usize>,

    #[validate(range(min = 1, max = 10000))]
    pub page_size: Option<usize>,
}

impl PageWindow {
    pub fn new(offset: Option<usize>, page_size: Option<usize>) -> Self {
        Self { offset, page_size }
    }

    /// Both halves, when the window is complete
    pub fn complete(&self) -> Option<(usize, usize)> {
        self.offset.zip(self.page_size)
    }

    /// Slice a fully filtered and ordered sequence
    ///
    /// Each half applies on its own: a missing offset starts at zero, a
    /// missing page size takes everything that remains.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.page_size.unwrap_or(usize::MAX))
            .collect()
    }

    /// Fill omitted halves from configured defaults
    pub fn with_defaults(self, config: &PagingConfig) -> Self {
        Self {
            offset: self.offset.or(config.default_offset),
            page_size: self.page_size.or(config.default_page_size),
        }
    }

    fn check(&self, max_page_size: usize) -> Result<(), QueryError> {
        let mut invalid: Vec<String> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .keys()
                .map(|field| match field.as_ref() {
                    "page_size" => PAGE_SIZE.to_string(),
                    other => other.to_string(),
                })
                .collect(),
        };

        if self.page_size.is_some_and(|size| size > max_page_size)
            && !invalid.iter().any(|f| f == PAGE_SIZE)
        {
            invalid.push(PAGE_SIZE.to_string());
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            invalid.sort();
            Err(QueryError::InvalidPaging(invalid))
        }
    }
}

/// Everything a collection request asks of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub sort: SortOptions,
    pub search: SearchOptions,
    pub window: PageWindow,
}

impl CollectionQuery {
    /// Build from raw query-string pairs
    ///
    /// Keys match case-insensitively; `orderBy` and `search` may repeat.
    /// Unrelated keys are ignored. Malformed `offset`/`pageSize` values are
    /// reported as [`QueryError::InvalidPaging`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        let mut malformed = Vec::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value: String = value.into();

            if key.eq_ignore_ascii_case(ORDER_BY) {
                query.sort.order_by.push(value);
            } else if key.eq_ignore_ascii_case(SEARCH) {
                query.search.search.push(value);
            } else if key.eq_ignore_ascii_case(OFFSET) {
                match value.trim().parse() {
                    Ok(offset) => query.window.offset = Some(offset),
                    Err(_) => malformed.push(OFFSET.to_string()),
                }
            } else if key.eq_ignore_ascii_case(PAGE_SIZE) {
                match value.trim().parse() {
                    Ok(size) => query.window.page_size = Some(size),
                    Err(_) => malformed.push(PAGE_SIZE.to_string()),
                }
            }
        }

        if malformed.is_empty() {
            Ok(query)
        } else {
            malformed.sort();
            malformed.dedup();
            Err(QueryError::InvalidPaging(malformed))
        }
    }

    /// Apply configured paging defaults and validate the window
    pub fn with_paging(mut self, config: &PagingConfig) -> Result<Self, QueryError> {
        self.window = self.window.with_defaults(config);
        self.window.check(config.max_page_size)?;
        Ok(self)
    }

    /// Non-paging parameters, in request order, for reproducing the query in links
    pub fn route_values(&self) -> Vec<(String, String)> {
        self.sort
            .order_by
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| (ORDER_BY.to_string(), v.clone()))
            .chain(
                self.search
                    .search
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(|v| (SEARCH.to_string(), v.clone())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldType, FieldValue};
    use crate::query::comparison::ComparisonStrategy;
    use crate::query::metadata::QueryField;
    use uuid::Uuid;

    #[derive(Clone, Debug)]
    struct Thing {
        name: &'static str,
        value: f64,
    }

    impl Entity for Thing {
        fn resource_name() -> &'static str {
            "assets"
        }

        fn id(&self) -> Uuid {
            Uuid::nil()
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(self.name.into()),
                "value" => Some(self.value.into()),
                _ => None,
            }
        }
    }

    fn things() -> Vec<Thing> {
        [("radio", 80.0), ("kettle", 25.0), ("Rug", 300.0)]
            .into_iter()
            .map(|(name, value)| Thing { name, value })
            .collect()
    }

    fn metadata() -> ResourceMetadata {
        ResourceMetadata::from_fields(
            "assets",
            &[
                QueryField::new("name", FieldType::String)
                    .default_sort()
                    .searchable(ComparisonStrategy::Text),
                QueryField::new("value", FieldType::Float)
                    .sortable()
                    .searchable(ComparisonStrategy::Range),
                QueryField::new("serial", FieldType::String)
                    .searchable(ComparisonStrategy::Equality),
            ],
        )
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_sort_terms_use_declared_name() {
        let options = SortOptions::new(strings(&["VALUE desc", "unknown", "Name"]));
        let terms = options.valid_terms(&metadata());
        let names: Vec<_> = terms.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["value", "name"]);
        assert!(terms[0].descending);
        assert!(!terms[1].descending);
    }

    #[test]
    fn test_sort_falls_back_to_default() {
        let options = SortOptions::new(strings(&["bogus desc"]));
        let terms = options.valid_terms(&metadata());
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].name, "name");
        assert!(terms[0].is_default);
        assert!(!terms[0].descending);
    }

    #[test]
    fn test_sort_without_defaults_is_empty() {
        let metadata = ResourceMetadata::from_fields(
            "tags",
            &[QueryField::new("label", FieldType::String).sortable()],
        );
        assert!(SortOptions::default().valid_terms(&metadata).is_empty());
    }

    #[test]
    fn test_search_valid_terms_filter_invalid_syntax() {
        let options = SearchOptions::new(strings(&["name eq", "name co lamp", "nope eq 1"]));
        let all: Vec<_> = options.all_terms().collect();
        assert_eq!(all.len(), 3);
        assert!(!all[0].valid_syntax);

        let valid = options.valid_terms(&metadata());
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].name, "name");
        assert_eq!(valid[0].comparer, Some(ComparisonStrategy::Text));
    }

    #[test]
    fn test_search_terms_with_bad_syntax_never_valid() {
        for raw in ["name", "name eq", "value", "x y"] {
            let options = SearchOptions::new(strings(&[raw]));
            assert!(options.all_terms().all(|t| !t.valid_syntax));
            assert!(options.valid_terms(&metadata()).is_empty());
        }
    }

    #[test]
    fn test_from_pairs_collects_repeated_keys() {
        let query = CollectionQuery::from_pairs(vec![
            ("orderBy", "value desc"),
            ("OrderBy", "name"),
            ("search", "name co lamp"),
            ("offset", "10"),
            ("pagesize", "5"),
            ("expand", "details"),
        ])
        .unwrap();

        assert_eq!(query.sort.order_by, strings(&["value desc", "name"]));
        assert_eq!(query.search.search, strings(&["name co lamp"]));
        assert_eq!(query.window, PageWindow::new(Some(10), Some(5)));
    }

    #[test]
    fn test_from_pairs_rejects_malformed_numbers() {
        let err = CollectionQuery::from_pairs(vec![("offset", "ten"), ("pageSize", "-1")])
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidPaging(strings(&["offset", "pageSize"]))
        );
    }

    #[test]
    fn test_with_paging_applies_defaults() {
        let config = PagingConfig {
            default_offset: Some(0),
            default_page_size: Some(25),
            max_page_size: 10000,
        };
        let query = CollectionQuery::from_pairs(vec![("pageSize", "5")])
            .unwrap()
            .with_paging(&config)
            .unwrap();
        assert_eq!(query.window, PageWindow::new(Some(0), Some(5)));
    }

    #[test]
    fn test_with_paging_rejects_out_of_range() {
        let config = PagingConfig::default();

        let err = CollectionQuery::from_pairs(vec![("pageSize", "0")])
            .unwrap()
            .with_paging(&config)
            .unwrap_err();
        assert_eq!(err, QueryError::InvalidPaging(strings(&["pageSize"])));

        let err = CollectionQuery::from_pairs(vec![("offset", "10001")])
            .unwrap()
            .with_paging(&config)
            .unwrap_err();
        assert_eq!(err, QueryError::InvalidPaging(strings(&["offset"])));
    }

    #[test]
    fn test_with_paging_honors_configured_maximum() {
        let config = PagingConfig {
            default_offset: None,
            default_page_size: None,
            max_page_size: 50,
        };
        let err = CollectionQuery::from_pairs(vec![("pageSize", "51")])
            .unwrap()
            .with_paging(&config)
            .unwrap_err();
        assert_eq!(err, QueryError::InvalidPaging(strings(&["pageSize"])));
    }

    #[test]
    fn test_slice_each_half_applies_alone() {
        let items: Vec<u32> = (0..10).collect();
        let slice = |offset, size| PageWindow::new(offset, size).slice(items.clone());
        assert_eq!(slice(Some(8), None), vec![8, 9]);
        assert_eq!(slice(None, Some(2)), vec![0, 1]);
        assert_eq!(slice(Some(4), Some(3)), vec![4, 5, 6]);
        assert!(slice(Some(50), Some(3)).is_empty());
    }

    #[test]
    fn test_route_values_preserve_order() {
        let query = CollectionQuery::from_pairs(vec![
            ("search", "name co lamp"),
            ("orderBy", "value desc"),
            ("offset", "5"),
        ])
        .unwrap();
        assert_eq!(
            query.route_values(),
            vec![
                ("orderBy".to_string(), "value desc".to_string()),
                ("search".to_string(), "name co lamp".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_apply_orders_by_terms() {
        let sort = SortOptions::new(strings(&["value desc"]));
        let sorted = sort.apply(things(), &metadata());
        let names: Vec<_> = sorted.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Rug", "radio", "kettle"]);
    }

    #[test]
    fn test_search_apply_filters() {
        let found = SearchOptions::new(strings(&["name sw r"]))
            .apply(things(), &metadata())
            .unwrap();
        let names: Vec<_> = found.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["radio", "Rug"]);
    }

    #[test]
    fn test_search_apply_rejects_invalid_term() {
        let search = SearchOptions::new(strings(&["value eq lots"]));
        let result = search.apply(things(), &metadata());
        assert!(matches!(
            result,
            Err(QueryError::InvalidSearchOperation { .. })
        ));
    }
}
