//! A complete set of declarations and schedule entries.

use super::job::{Declaration, JobInvocation};
use super::schedule::Schedule;

/// Jobs to run at one time expression.
///
/// Each top-level invocation renders to its own crontab line. Invocations
/// only chain when one is nested inside another.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    schedule: Schedule,
    jobs: Vec<JobInvocation>,
}

impl ScheduleEntry {
    /// Create an entry with no jobs.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            jobs: Vec::new(),
        }
    }

    /// Add a top-level job.
    pub fn with_job(mut self, job: JobInvocation) -> Self {
        self.jobs.push(job);
        self
    }

    /// Get the time expression.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Get the top-level jobs.
    pub fn jobs(&self) -> &[JobInvocation] {
        &self.jobs
    }
}

/// Top-level declarations followed by schedule entries.
#[derive(Debug, Clone, Default)]
pub struct JobList {
    declarations: Vec<Declaration>,
    entries: Vec<ScheduleEntry>,
}

impl JobList {
    /// Create an empty job list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level declaration.
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Add a schedule entry.
    pub fn with_entry(mut self, entry: ScheduleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Get the top-level declarations.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Get the schedule entries.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Total number of top-level jobs across entries.
    pub fn job_count(&self) -> usize {
        self.entries.iter().map(|e| e.jobs().len()).sum()
    }
}
