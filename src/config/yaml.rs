//! YAML schedule file parsing.
//!
//! Parses a schedule file and validates the parts that can be checked without
//! rendering: time expressions, names, and non-empty entries. Branching and
//! undefined job types depend on scoping and are reported by the renderer.

use std::path::Path;

use crate::core::schedule::Schedule;
use crate::core::types::{JobTypeName, OptionName};

use super::error::ConfigError;
use super::types::{EntryConfig, InvocationConfig, JobListConfig, OptionValue};

/// YAML configuration loader.
pub struct YamlLoader;

impl YamlLoader {
    /// Load a schedule file.
    pub fn load_job_list(path: impl AsRef<Path>) -> Result<JobListConfig, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        let config: JobListConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlFileError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::validate_job_list(&config)?;
        Ok(config)
    }

    /// Parse a schedule from a YAML string.
    pub fn parse_job_list(yaml: &str) -> Result<JobListConfig, ConfigError> {
        let config: JobListConfig = serde_yaml::from_str(yaml)?;
        Self::validate_job_list(&config)?;
        Ok(config)
    }

    /// Validate a parsed schedule.
    fn validate_job_list(config: &JobListConfig) -> Result<(), ConfigError> {
        if let Some(path) = &config.path
            && path.trim().is_empty()
        {
            return Err(ConfigError::InvalidConfig("path cannot be empty".into()));
        }

        Self::validate_options(&config.set)?;
        Self::validate_job_types(config.job_types.keys())?;

        for entry in &config.every {
            Self::validate_entry(entry)?;
        }

        Ok(())
    }

    fn validate_entry(entry: &EntryConfig) -> Result<(), ConfigError> {
        if entry.at.trim().is_empty() {
            return Err(ConfigError::MissingField("at".into()));
        }

        Schedule::new(&entry.at)
            .map_err(|e| ConfigError::InvalidConfig(format!("invalid schedule: {}", e)))?;

        if entry.jobs.is_empty() {
            return Err(ConfigError::InvalidConfig(format!(
                "entry '{}' has no jobs",
                entry.at
            )));
        }

        for job in &entry.jobs {
            Self::validate_invocation(job)?;
        }
        Ok(())
    }

    fn validate_invocation(invocation: &InvocationConfig) -> Result<(), ConfigError> {
        if invocation.job.is_empty() {
            return Err(ConfigError::MissingField("job".into()));
        }
        if !JobTypeName::new(invocation.job.as_str()).is_valid() {
            return Err(ConfigError::InvalidConfig(format!(
                "invalid job type name '{}'",
                invocation.job
            )));
        }

        Self::validate_options(&invocation.options)?;
        Self::validate_options(&invocation.set)?;
        Self::validate_job_types(invocation.job_types.keys())?;

        for child in &invocation.jobs {
            Self::validate_invocation(child)?;
        }
        Ok(())
    }

    fn validate_options<'a>(
        options: impl IntoIterator<Item = (&'a String, &'a OptionValue)>,
    ) -> Result<(), ConfigError> {
        for (name, _) in options {
            if !OptionName::new(name.as_str()).is_valid() {
                return Err(ConfigError::InvalidConfig(format!(
                    "invalid option name '{}'",
                    name
                )));
            }
        }
        Ok(())
    }

    fn validate_job_types<'a>(
        names: impl IntoIterator<Item = &'a String>,
    ) -> Result<(), ConfigError> {
        for name in names {
            if !JobTypeName::new(name.as_str()).is_valid() {
                return Err(ConfigError::InvalidConfig(format!(
                    "invalid job type name '{}'",
                    name
                )));
            }
        }
        Ok(())
    }
}
