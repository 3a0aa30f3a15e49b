pub mod config;
pub mod core;
pub mod crontab;
pub mod render;
pub mod testing;

pub use config::{
    ConfigError, JobListBuilder, JobListConfig, LoadedJobList, YamlLoader, load_job_list,
};
pub use core::job::{Declaration, JobInvocation, JobType, JoinOperator};
pub use core::job_list::{JobList, ScheduleEntry};
pub use core::options::{OptionLookup, OptionResolver, OptionSet};
pub use core::output::OutputRedirection;
pub use core::schedule::{Schedule, ScheduleError};
pub use core::scope::{DEFAULT_JOB_TEMPLATE, RenderScope, ScopeGuard, ScopeStack};
pub use core::template;
pub use core::types::{JobTypeName, OptionName};
pub use crontab::Crontab;
pub use render::{RenderError, RenderedEntry, Renderer};
