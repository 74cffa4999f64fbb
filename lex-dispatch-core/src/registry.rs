//! Action-type registry with prefix-minted names
//!
//! Several entity caches share the same reducer machinery, so their log
//! output needs names that cannot collide. Each family mints its names
//! through an `ActionTypes` registry created with a unique prefix.

use std::collections::HashMap;

/// Registry of action-type names minted under a common prefix.
///
/// `ActionTypes::new("COMPOUNDS", &["REQUESTED", "RETURNED", "FAILED"])`
/// mints `COMPOUNDS_REQUESTED` and so on. Minted names are held for the
/// registry's lifetime and looked up by their short name.
#[derive(Debug, Clone)]
pub struct ActionTypes {
    prefix: &'static str,
    names: HashMap<&'static str, String>,
}

impl ActionTypes {
    /// Mint one full name per short name under the given prefix.
    ///
    /// # Panics
    ///
    /// Panics if the same short name appears twice. Duplicate names would
    /// make log output ambiguous, and they only occur through a wiring
    /// mistake at startup.
    pub fn new(prefix: &'static str, names: &[&'static str]) -> Self {
        let mut minted = HashMap::with_capacity(names.len());
        for name in names {
            let full = format!("{prefix}_{name}");
            if minted.insert(*name, full).is_some() {
                panic!("duplicate action type {name:?} under prefix {prefix:?}");
            }
        }
        Self {
            prefix,
            names: minted,
        }
    }

    /// The prefix all names here were minted under
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Full minted name for a short name.
    ///
    /// # Panics
    ///
    /// Panics if the short name was never registered.
    pub fn get(&self, name: &str) -> &str {
        self.names
            .get(name)
            .unwrap_or_else(|| panic!("unknown action type {name:?} under prefix {:?}", self.prefix))
    }

    /// Whether a full minted name belongs to this registry
    pub fn contains(&self, full: &str) -> bool {
        self.names.values().any(|v| v == full)
    }
}
