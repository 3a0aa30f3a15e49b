//! Option values substituted into job templates.
//!
//! Options come in two tiers. Global options are set on a scope and inherited
//! by every nested scope; local options are given at a single job invocation.
//! [`OptionResolver`] looks a name up local first, then through the global
//! chain from the nearest scope outward.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set of named option values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: HashMap<String, String>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an option.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get an option value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Check if an option is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the number of options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the options.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }
}

impl FromIterator<(String, String)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Something that can answer "what is the value of option `name`?".
///
/// The template filler only sees this trait, so callers can supply a resolver
/// or a plain [`OptionSet`].
pub trait OptionLookup {
    /// Look up an option; `None` means unresolved.
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl OptionLookup for OptionSet {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

/// Resolves options with local-over-global precedence.
#[derive(Debug, Clone)]
pub struct OptionResolver<'a> {
    local: &'a OptionSet,
    /// Global sets, nearest scope first.
    globals: Vec<&'a OptionSet>,
}

impl<'a> OptionResolver<'a> {
    /// Create a resolver over a local set and a chain of global sets ordered
    /// from the nearest enclosing scope outward.
    pub fn new(local: &'a OptionSet, globals: impl IntoIterator<Item = &'a OptionSet>) -> Self {
        Self {
            local,
            globals: globals.into_iter().collect(),
        }
    }

    /// Resolve an option: local, then each global from nearest to furthest.
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        if let Some(value) = self.local.get(name) {
            return Some(value);
        }
        self.globals.iter().find_map(|set| set.get(name))
    }
}

impl OptionLookup for OptionResolver<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.resolve(name)
    }
}
