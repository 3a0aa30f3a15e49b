//! Shell output redirection for rendered jobs.
//!
//! The `:output` placeholder in the stock job types is filled from an
//! [`OutputRedirection`]. Paths are used as given; when streams are split,
//! `/dev/null` gets truncating `>` instead of appending `>>`.

use serde::{Deserialize, Serialize};
use std::fmt;

const DEV_NULL: &str = "/dev/null";

/// Where a job's stdout and stderr go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputRedirection {
    /// No redirection at all.
    #[default]
    Inherit,
    /// Both streams appended to one file.
    Combined(String),
    /// Streams sent to separate destinations.
    Split {
        /// Destination for stdout.
        #[serde(default, alias = "stdout")]
        standard: Option<String>,
        /// Destination for stderr.
        #[serde(default, alias = "stderr")]
        error: Option<String>,
    },
}

impl OutputRedirection {
    /// Discard both streams.
    pub fn discard() -> Self {
        OutputRedirection::Combined(DEV_NULL.into())
    }

    /// Redirect both streams to the same file.
    pub fn combined(path: impl Into<String>) -> Self {
        OutputRedirection::Combined(path.into())
    }

    /// Redirect streams separately.
    pub fn split(standard: Option<&str>, error: Option<&str>) -> Self {
        OutputRedirection::Split {
            standard: standard.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    /// The shell redirection suffix, empty when nothing is redirected.
    pub fn to_shell(&self) -> String {
        match self {
            OutputRedirection::Inherit => String::new(),
            OutputRedirection::Combined(path) => format!(">> {} 2>&1", path),
            OutputRedirection::Split { standard, error } => {
                split_redirect(standard.as_deref(), error.as_deref())
            }
        }
    }
}

fn split_redirect(standard: Option<&str>, error: Option<&str>) -> String {
    match (standard, error) {
        (Some(DEV_NULL), Some(DEV_NULL)) => format!("> {} 2>&1", DEV_NULL),
        (Some(out), Some(DEV_NULL)) => format!(">> {} 2> {}", out, DEV_NULL),
        (Some(out), Some(err)) => format!(">> {} 2>> {}", out, err),
        (None, Some(DEV_NULL)) => format!("2> {}", DEV_NULL),
        (None, Some(err)) => format!("2>> {}", err),
        (Some(DEV_NULL), None) => format!("> {}", DEV_NULL),
        (Some(out), None) => format!(">> {}", out),
        (None, None) => String::new(),
    }
}

impl fmt::Display for OutputRedirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}
