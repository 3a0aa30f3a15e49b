//! Core data model: options, templates, job types, scopes and schedules.

pub mod job;
pub mod job_list;
pub mod options;
pub mod output;
pub mod schedule;
pub mod scope;
pub mod template;
pub mod types;
