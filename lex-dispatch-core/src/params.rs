//! Query parameters, cache keys, and item identity

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flat, order-independent set of query parameters.
///
/// Two parameter sets are equal when they contain the same names mapped to
/// the same values, regardless of insertion order. Nested values are not
/// supported; everything is a string on the wire anyway.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Insert a parameter, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a parameter value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate over name/value pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the set contains no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render as `(name, value)` pairs for an HTTP query string
    pub fn to_query(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Key under which one cache slice lives.
///
/// Derived from request parameters by a [`KeySpec`]; every action produced
/// by a query family carries the key so reducers can route without
/// re-deriving it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identity of a single row or tree node within a cache slice
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How a query family derives its cache key from request parameters.
#[derive(Clone, Copy, Debug)]
pub enum KeySpec {
    /// Key is the value of a single parameter, e.g. `synsetId`
    Field(&'static str),
    /// Key combines two parameters as `from<a>to<b>`
    Composite {
        from: &'static str,
        to: &'static str,
    },
    /// Arbitrary derivation for keys no standard shape covers
    Custom(fn(&Params) -> CacheKey),
}

impl KeySpec {
    /// Derive the cache key for a parameter set.
    ///
    /// # Panics
    ///
    /// Panics if a named key field is missing from the parameters. A family
    /// configured with a key field its callers do not supply is a wiring
    /// mistake, not a runtime condition to recover from.
    pub fn derive(&self, params: &Params) -> CacheKey {
        match self {
            KeySpec::Field(field) => {
                let value = params.get(field).unwrap_or_else(|| {
                    panic!("missing cache key field {field:?} in params {params:?}")
                });
                CacheKey::new(value)
            }
            KeySpec::Composite { from, to } => {
                let a = params.get(from).unwrap_or_else(|| {
                    panic!("missing cache key field {from:?} in params {params:?}")
                });
                let b = params.get(to).unwrap_or_else(|| {
                    panic!("missing cache key field {to:?} in params {params:?}")
                });
                CacheKey::new(format!("from{a}to{b}"))
            }
            KeySpec::Custom(derive) => derive(params),
        }
    }
}
