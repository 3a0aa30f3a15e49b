//! Rendering of job invocations into command lines.
//!
//! [`Renderer`] is the entry point: it takes a [`JobList`](crate::JobList) or
//! a single invocation and produces the shell commands for each top-level job.
//! Nested invocations are chained by the composer, which rejects any job that
//! branches into more than one nested job.

mod command;
mod composer;
mod engine;

use thiserror::Error;

use crate::core::job::JobInvocation;
use crate::core::types::JobTypeName;

pub use composer::{compose, ensure_single_chain, join};
pub use engine::{RenderedEntry, Renderer};

/// Errors that abort rendering of a schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A nested job branches into several jobs, which would need them to run
    /// in parallel.
    #[error(
        "parallel jobs are not supported: {job_type} {task:?} has {children} nested jobs, only one can be chained"
    )]
    ParallelJobsNotSupported {
        job_type: JobTypeName,
        task: String,
        children: usize,
    },

    /// No job type of that name is visible in the invocation's scope.
    #[error("undefined job type '{job_type}' (task {task:?})")]
    UndefinedJobType { job_type: JobTypeName, task: String },
}

impl RenderError {
    pub(crate) fn parallel(invocation: &JobInvocation) -> Self {
        RenderError::ParallelJobsNotSupported {
            job_type: invocation.job_type().clone(),
            task: invocation.task().to_string(),
            children: invocation.children().len(),
        }
    }

    pub(crate) fn undefined(invocation: &JobInvocation) -> Self {
        RenderError::UndefinedJobType {
            job_type: invocation.job_type().clone(),
            task: invocation.task().to_string(),
        }
    }
}
