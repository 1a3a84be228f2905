//! Route references embedded in resources

use serde::{Deserialize, Serialize};

pub const GET: &str = "GET";

fn default_method() -> String {
    GET.to_string()
}

fn is_get(method: &String) -> bool {
    method.eq_ignore_ascii_case(GET)
}

/// A pointer to another resource
///
/// Built unresolved (a route name plus ordered route values) and turned into
/// an absolute `href` by a [`LinkRewriter`](crate::links::LinkRewriter) at
/// response time. Only `{href, method, rel}` are ever serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: Option<String>,

    #[serde(default = "default_method", skip_serializing_if = "is_get")]
    pub method: String,

    #[serde(rename = "rel", default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<String>,

    /// Cleared once the link has been resolved
    #[serde(skip)]
    pub route_name: Option<String>,

    #[serde(skip)]
    pub route_values: Vec<(String, String)>,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            href: None,
            method: default_method(),
            relations: Vec::new(),
            route_name: None,
            route_values: Vec::new(),
        }
    }
}

impl Link {
    /// Plain GET link to a named route
    pub fn to(route_name: impl Into<String>) -> Self {
        Self {
            route_name: Some(route_name.into()),
            ..Self::default()
        }
    }

    /// GET link to a collection route (`rel: ["collection"]`)
    pub fn to_collection(route_name: impl Into<String>) -> Self {
        Self {
            relations: vec!["collection".to_string()],
            ..Self::to(route_name)
        }
    }

    /// Link describing a form submission
    pub fn to_form<R, S>(
        route_name: impl Into<String>,
        method: impl Into<String>,
        relations: R,
    ) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            relations: relations.into_iter().map(Into::into).collect(),
            ..Self::to(route_name)
        }
    }

    /// An already resolved link
    pub fn resolved(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Set a route value, replacing any existing value with the same key
    pub fn with_value(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.route_values.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.route_values.push((key, value)),
        }
        self
    }

    /// Append route values, keeping repeated keys
    pub fn with_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.route_values.extend(values);
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.route_values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True while a route name is still waiting to be resolved
    pub fn is_pending(&self) -> bool {
        self.route_name.is_some()
    }
}

/// Flat copy of a resource's own link, serialized inline with its fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(rename = "rel", default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<String>,
}

impl SelfLink {
    /// Copy a resolved link; unresolved links leave `self` untouched
    pub fn copy_from(&mut self, link: &Link) {
        if link.href.is_none() {
            return;
        }

        self.href = link.href.clone();
        self.method = (!is_get(&link.method)).then(|| link.method.clone());
        self.relations = link.relations.clone();
    }
}
