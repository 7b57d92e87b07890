use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique, case-sensitive router name. Identity is the sole key; a router
/// carries no other attributes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouterId(String);

impl RouterId {
    /// Create a router id from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouterId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RouterId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for RouterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `BTreeMap<RouterId, _>` be queried with a plain `&str`. The derived
// `Ord` delegates to `String`, which orders identically to `str`.
impl Borrow<str> for RouterId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A symmetric weighted edge between two distinct routers.
///
/// Endpoints are normalized on construction so the lexicographically smaller
/// id comes first: `A <-> B` and `B <-> A` are the same link.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub a: RouterId,
    pub b: RouterId,
    /// Positive link cost; identical in both directions.
    pub cost: u32,
}

impl Link {
    pub fn new(a: RouterId, b: RouterId, cost: u32) -> Self {
        if b < a {
            Self { a: b, b: a, cost }
        } else {
            Self { a, b, cost }
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {} (cost {})", self.a, self.b, self.cost)
    }
}
