//! Job list builder from YAML configuration.
//!
//! This module converts a [`JobListConfig`] into the core [`JobList`] model
//! and the base scope its jobs render against.

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::job::{Declaration, JobInvocation};
use crate::core::job_list::{JobList, ScheduleEntry};
use crate::core::options::OptionSet;
use crate::core::output::OutputRedirection;
use crate::core::schedule::Schedule;
use crate::core::scope::RenderScope;
use crate::render::Renderer;

use super::error::ConfigError;
use super::types::{EntryConfig, InvocationConfig, JobListConfig, OptionValue};
use super::yaml::YamlLoader;

/// Builder for creating job lists from YAML configuration.
pub struct JobListBuilder;

impl JobListBuilder {
    /// Build a JobList from a JobListConfig.
    ///
    /// Top-level `output`, `set`, `job_template` and `job_types` become the
    /// list's declarations, in that order.
    pub fn build(config: &JobListConfig) -> Result<JobList, ConfigError> {
        let mut list = JobList::new();

        if let Some(output) = &config.output {
            list = list.with_declaration(Declaration::set("output", output_shell(output)));
        }
        for declaration in Self::block_declarations(
            &config.set,
            config.job_template.as_ref(),
            &config.job_types,
        ) {
            list = list.with_declaration(declaration);
        }

        for entry_config in &config.every {
            list = list.with_entry(Self::build_entry(entry_config)?);
        }

        Ok(list)
    }

    /// The outermost scope for a schedule file.
    ///
    /// With `defaults` the stock declarations are seeded; either way `:path`
    /// is set, falling back to `default_path` when the file gives none.
    pub fn base_scope(config: &JobListConfig, default_path: &str) -> RenderScope {
        let path = config.path.as_deref().unwrap_or(default_path);
        if config.defaults {
            RenderScope::with_defaults(path)
        } else {
            let mut scope = RenderScope::new();
            scope.set_option("path", path);
            scope
        }
    }

    fn build_entry(config: &EntryConfig) -> Result<ScheduleEntry, ConfigError> {
        let schedule = Schedule::new(&config.at)
            .map_err(|e| ConfigError::InvalidConfig(format!("invalid schedule: {}", e)))?;

        Ok(config
            .jobs
            .iter()
            .map(Self::build_invocation)
            .fold(ScheduleEntry::new(schedule), ScheduleEntry::with_job))
    }

    /// Build a JobInvocation, recursing into nested jobs.
    fn build_invocation(config: &InvocationConfig) -> JobInvocation {
        let mut options = option_set(&config.options);
        // A local output setting fills `:output` for this job only
        if let Some(output) = &config.output {
            options.set("output", output_shell(output));
        }

        let mut invocation = JobInvocation::new(config.job.as_str(), config.task.as_str())
            .with_options(options)
            .with_halt_on_failure(config.halt_on_failure);

        for declaration in Self::block_declarations(
            &config.set,
            config.job_template.as_ref(),
            &config.job_types,
        ) {
            invocation = invocation.with_declaration(declaration);
        }

        invocation.with_children(config.jobs.iter().map(Self::build_invocation))
    }

    fn block_declarations(
        set: &BTreeMap<String, OptionValue>,
        job_template: Option<&Option<String>>,
        job_types: &BTreeMap<String, String>,
    ) -> Vec<Declaration> {
        let mut declarations: Vec<Declaration> = set
            .iter()
            .map(|(name, value)| Declaration::set(name.as_str(), value.to_text()))
            .collect();

        if let Some(template) = job_template {
            declarations.push(Declaration::job_template(template.as_deref()));
        }

        declarations.extend(
            job_types
                .iter()
                .map(|(name, template)| Declaration::job_type(name.as_str(), template.as_str())),
        );
        declarations
    }
}

/// `null` in the file means discard.
fn output_shell(output: &Option<OutputRedirection>) -> String {
    output
        .clone()
        .unwrap_or_else(OutputRedirection::discard)
        .to_shell()
}

fn option_set(values: &BTreeMap<String, OptionValue>) -> OptionSet {
    values
        .iter()
        .map(|(name, value)| (name.clone(), value.to_text()))
        .collect()
}

/// A schedule file ready to render.
#[derive(Debug, Clone)]
pub struct LoadedJobList {
    /// Renderer over the file's base scope.
    pub renderer: Renderer,
    /// The file's entries and top-level declarations.
    pub list: JobList,
}

impl LoadedJobList {
    /// Build from an already parsed configuration.
    pub fn from_config(config: &JobListConfig, default_path: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            renderer: Renderer::new(JobListBuilder::base_scope(config, default_path)),
            list: JobListBuilder::build(config)?,
        })
    }
}

/// Load a schedule file and build everything needed to render it.
pub fn load_job_list(
    path: impl AsRef<Path>,
    default_path: &str,
) -> Result<LoadedJobList, ConfigError> {
    let path = path.as_ref();
    let config = YamlLoader::load_job_list(path)?;
    let loaded = LoadedJobList::from_config(&config, default_path)?;

    tracing::debug!(
        path = %path.display(),
        entries = loaded.list.entries().len(),
        jobs = loaded.list.job_count(),
        "Loaded job list"
    );
    Ok(loaded)
}
