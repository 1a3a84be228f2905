//! Route name to absolute URL resolution

use crate::core::error::ConfigError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

/// Turns a route name plus route values into an absolute URL
///
/// `None` means the route cannot be resolved; callers degrade to a null
/// `href` instead of failing.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, route_name: &str, values: &[(String, String)]) -> Option<String>;
}

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)\}$").unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A path template such as `/assets/{assetId}/details`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match placeholder_pattern().captures(s) {
                Some(caps) => Segment::Placeholder(caps[1].to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { segments }
    }

    /// Placeholder names in path order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Named routes joined to an absolute base URL
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: Url,
    routes: HashMap<String, RouteTemplate>,
}

impl RouteTable {
    /// Create an empty table rooted at `base_url`
    ///
    /// The base must be absolute and able to carry a path.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                message: format!("'{}' cannot carry a path", base_url),
            });
        }

        Ok(Self {
            base,
            routes: HashMap::new(),
        })
    }

    /// Declare a route
    pub fn route(mut self, name: impl Into<String>, template: &str) -> Self {
        let template = RouteTemplate::parse(template);
        self.routes.insert(name.into(), template);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl LinkResolver for RouteTable {
    /// Placeholders take the first value whose key matches case-insensitively;
    /// every other value is appended to the query string in order.
    fn resolve(&self, route_name: &str, values: &[(String, String)]) -> Option<String> {
        let template = self.routes.get(route_name)?;
        let mut used = vec![false; values.len()];
        let mut path = Vec::with_capacity(template.segments.len());

        for segment in &template.segments {
            match segment {
                Segment::Literal(text) => path.push(text.as_str()),
                Segment::Placeholder(name) => {
                    let index = values
                        .iter()
                        .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
                    used[index] = true;
                    path.push(values[index].1.as_str());
                }
            }
        }

        let mut url = self.base.clone();
        if !path.is_empty() {
            url.path_segments_mut().ok()?.pop_if_empty().extend(path);
        }

        let remaining: Vec<_> = values
            .iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(pair, _)| pair)
            .collect();

        if !remaining.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in remaining {
                query.append_pair(key, value);
            }
        }

        Some(url.into())
    }
}
