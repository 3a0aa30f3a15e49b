//! Job types, declarations and job invocations.
//!
//! A [`JobType`] names a command template. A [`JobInvocation`] calls a job type
//! with a task and local options, and may open a block: the block's
//! [`Declaration`]s shape the scope its child invocations render in.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::options::OptionSet;
use super::template;
use super::types::{JobTypeName, OptionName};

/// A named command template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobType {
    name: JobTypeName,
    template: String,
}

impl JobType {
    /// Create a new job type.
    pub fn new(name: impl Into<JobTypeName>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Get the job type name.
    pub fn name(&self) -> &JobTypeName {
        &self.name
    }

    /// Get the command template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Options the template refers to, in order of first use.
    pub fn option_names(&self) -> Vec<&str> {
        template::placeholders(&self.template)
            .into_iter()
            .filter(|name| *name != template::TASK && *name != template::JOB)
            .collect()
    }
}

/// A declaration that changes the active scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Set a global option for this scope and its descendants.
    Set { name: OptionName, value: String },
    /// Replace the wrapping template; `None` disables wrapping.
    JobTemplate(Option<String>),
    /// Define (or shadow) a job type.
    JobType(JobType),
}

impl Declaration {
    /// Shorthand for [`Declaration::Set`].
    pub fn set(name: impl Into<OptionName>, value: impl Into<String>) -> Self {
        Declaration::Set {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Declaration::JobTemplate`].
    pub fn job_template(template: Option<&str>) -> Self {
        Declaration::JobTemplate(template.map(str::to_string))
    }

    /// Shorthand for [`Declaration::JobType`].
    pub fn job_type(name: impl Into<JobTypeName>, template: impl Into<String>) -> Self {
        Declaration::JobType(JobType::new(name, template))
    }
}

/// Shell operator placed between two chained commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOperator {
    /// `&&`: the next command runs only if the previous one succeeded.
    And,
    /// `;`: the next command runs regardless.
    Sequence,
}

impl JoinOperator {
    /// The operator as it appears in the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinOperator::And => "&&",
            JoinOperator::Sequence => ";",
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call to a job type, possibly with nested invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInvocation {
    /// The job type to render.
    job_type: JobTypeName,
    /// Value for the `:task` placeholder.
    task: String,
    /// Local options, taking precedence over any global.
    options: OptionSet,
    /// Whether a failure of this job stops the chained commands after it.
    halt_on_failure: bool,
    /// Declarations opening the scope of `children`.
    declarations: Vec<Declaration>,
    /// Nested invocations.
    children: Vec<JobInvocation>,
}

impl JobInvocation {
    /// Create an invocation of `job_type` with the given task.
    pub fn new(job_type: impl Into<JobTypeName>, task: impl Into<String>) -> Self {
        Self {
            job_type: job_type.into(),
            task: task.into(),
            options: OptionSet::new(),
            halt_on_failure: true,
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a local option.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.set(name, value);
        self
    }

    /// Replace the local options.
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    /// Set whether a failure of this job halts the chain after it.
    pub fn with_halt_on_failure(mut self, halt: bool) -> Self {
        self.halt_on_failure = halt;
        self
    }

    /// Add a declaration to this invocation's block.
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Nest an invocation inside this one's block.
    pub fn with_child(mut self, child: JobInvocation) -> Self {
        self.children.push(child);
        self
    }

    /// Nest several invocations inside this one's block.
    pub fn with_children(mut self, children: impl IntoIterator<Item = JobInvocation>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get the job type name.
    pub fn job_type(&self) -> &JobTypeName {
        &self.job_type
    }

    /// Get the task.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Get the local options.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Whether a failure of this job halts the chain after it.
    pub fn halt_on_failure(&self) -> bool {
        self.halt_on_failure
    }

    /// The operator joining this job to the command chained after it.
    pub fn join_operator(&self) -> JoinOperator {
        if self.halt_on_failure {
            JoinOperator::And
        } else {
            JoinOperator::Sequence
        }
    }

    /// Get the block declarations.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Get the nested invocations.
    pub fn children(&self) -> &[JobInvocation] {
        &self.children
    }
}

impl fmt::Display for JobInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.job_type, self.task)
    }
}
