//! Configuration loading and parsing.
//!
//! This module provides the YAML schedule file format and its conversion
//! into a [`JobList`](crate::JobList) and base render scope.

mod builder;
mod error;
mod types;
mod yaml;

pub use builder::{JobListBuilder, LoadedJobList, load_job_list};
pub use error::ConfigError;
pub use types::{EntryConfig, InvocationConfig, JobListConfig, OptionValue};
pub use yaml::YamlLoader;
