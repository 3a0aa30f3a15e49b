//! Top-level rendering of job lists and schedule entries.

use serde::Serialize;

use crate::core::job::JobInvocation;
use crate::core::job_list::{JobList, ScheduleEntry};
use crate::core::scope::{RenderScope, ScopeStack};

use super::RenderError;
use super::composer::{compose, ensure_single_chain};

/// Commands rendered for one schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEntry {
    /// The entry's time expression.
    pub at: String,
    /// One command per top-level job, in declaration order.
    pub commands: Vec<String>,
}

/// Renders job invocations against a base scope.
///
/// The renderer holds no mutable state: each top-level invocation gets a
/// fresh scope stack built from the base scope.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    base: RenderScope,
}

impl Renderer {
    /// Create a renderer whose outermost scope is `base`.
    pub fn new(base: RenderScope) -> Self {
        Self { base }
    }

    /// Get the outermost scope.
    pub fn base(&self) -> &RenderScope {
        &self.base
    }

    /// Render one top-level invocation and its nested jobs.
    pub fn render_invocation(&self, invocation: &JobInvocation) -> Result<String, RenderError> {
        ensure_single_chain(invocation)?;
        let mut stack = ScopeStack::new(self.base.clone());
        compose(&mut stack, invocation)
    }

    /// Render every top-level job of an entry.
    ///
    /// All jobs are checked for branching before any is rendered; if any job
    /// fails, the entry yields no commands at all.
    pub fn render_entry(&self, entry: &ScheduleEntry) -> Result<RenderedEntry, RenderError> {
        for job in entry.jobs() {
            ensure_single_chain(job)?;
        }

        let commands = entry
            .jobs()
            .iter()
            .map(|job| self.render_invocation(job))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RenderedEntry {
            at: entry.schedule().expression().to_string(),
            commands,
        })
    }

    /// A renderer for a job list: the list's top-level declarations are
    /// applied on top of this renderer's base scope.
    pub fn for_list(&self, list: &JobList) -> Renderer {
        Renderer::new(self.base.clone().with_declarations(list.declarations()))
    }

    /// Render every entry of a job list, stopping at the first failure.
    pub fn render_list(&self, list: &JobList) -> Result<Vec<RenderedEntry>, RenderError> {
        let renderer = self.for_list(list);
        let rendered = list
            .entries()
            .iter()
            .map(|entry| renderer.render_entry(entry))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            entries = rendered.len(),
            jobs = list.job_count(),
            "Rendered job list"
        );
        Ok(rendered)
    }
}
