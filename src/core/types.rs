//! Core identifier types for the renderer.
//!
//! These types provide type-safe names for job types and options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a job type (e.g. `rake`, `some_job`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobTypeName(String);

/// Name of a template option (the part after the `:` sigil).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionName(String);

impl JobTypeName {
    /// Create a new JobTypeName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the name is usable as a job type: non-empty and made of
    /// word characters only.
    pub fn is_valid(&self) -> bool {
        is_word(&self.0)
    }
}

impl From<&str> for JobTypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobTypeName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl OptionName {
    /// Create a new OptionName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An option can only be referenced from a template if it is a word.
    pub fn is_valid(&self) -> bool {
        is_word(&self.0)
    }

    /// The placeholder token for this option, e.g. `:path`.
    pub fn placeholder(&self) -> String {
        format!(":{}", self.0)
    }
}

impl From<&str> for OptionName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OptionName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for JobTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
