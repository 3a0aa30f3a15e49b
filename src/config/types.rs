//! Configuration type definitions.
//!
//! These types mirror the YAML schedule file: top-level settings and
//! declarations, schedule entries, and (possibly nested) job invocations.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::core::output::OutputRedirection;

/// A schedule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListConfig {
    /// Value of the `:path` option; defaults to the working directory.
    pub path: Option<String>,
    /// Seed the stock job types, options and wrapping template.
    #[serde(default = "default_true")]
    pub defaults: bool,
    /// Wrapping template. `null` disables wrapping, absent keeps the default.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub job_template: Option<Option<String>>,
    /// Output redirection. `null` discards output, absent leaves it alone.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub output: Option<Option<OutputRedirection>>,
    /// Global options.
    #[serde(default)]
    pub set: BTreeMap<String, OptionValue>,
    /// Job type definitions (name to template).
    #[serde(default)]
    pub job_types: BTreeMap<String, String>,
    /// Schedule entries.
    #[serde(default)]
    pub every: Vec<EntryConfig>,
}

fn default_true() -> bool {
    true
}

/// Distinguish an explicit `null` from an absent field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Jobs sharing a time expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Crontab time expression or `@` shortcut.
    pub at: String,
    /// Top-level jobs; each renders to its own line.
    #[serde(default)]
    pub jobs: Vec<InvocationConfig>,
}

/// A job invocation, with an optional block of declarations and nested jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Job type name.
    pub job: String,
    /// Task substituted for `:task`.
    pub task: String,
    /// Whether a failure stops the nested job from running.
    #[serde(default = "default_true")]
    pub halt_on_failure: bool,
    /// Local options.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
    /// Local output redirection, filling `:output` for this job only.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub output: Option<Option<OutputRedirection>>,
    /// Global options set inside this job's block.
    #[serde(default)]
    pub set: BTreeMap<String, OptionValue>,
    /// Wrapping template for the block.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub job_template: Option<Option<String>>,
    /// Job types defined inside the block.
    #[serde(default)]
    pub job_types: BTreeMap<String, String>,
    /// Nested jobs.
    #[serde(default)]
    pub jobs: Vec<InvocationConfig>,
}

/// A scalar option value as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Flag(bool),
    /// Number, kept in its YAML spelling.
    Number(serde_yaml::Number),
    /// Plain text.
    Text(String),
}

impl OptionValue {
    /// The text substituted into templates.
    pub fn to_text(&self) -> String {
        match self {
            OptionValue::Flag(b) => b.to_string(),
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Text(s) => s.clone(),
        }
    }
}
