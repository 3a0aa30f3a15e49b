//! Render scopes: the active wrapping template, job types and global options.
//!
//! Scopes form a stack. Entering an invocation's block pushes a scope that
//! copies the job types and wrapping template of its parent and then applies
//! the block's declarations; global options set in the block live only on
//! the pushed scope and are found through the resolver chain. Leaving the
//! block pops the scope, so nothing defined inside leaks to the parent or to
//! sibling blocks.
//!
//! The push is tied to a [`ScopeGuard`], which pops on drop. Every exit path
//! of a render, including `?` on an error, restores the parent view.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use super::job::{Declaration, JobType};
use super::options::{OptionResolver, OptionSet};
use super::types::JobTypeName;

/// Wrapping template applied around every job by default.
pub const DEFAULT_JOB_TEMPLATE: &str = "/bin/bash -l -c ':job'";

/// One level of the scope stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderScope {
    /// Wrapping template; `None` leaves jobs unwrapped.
    job_template: Option<String>,
    /// Job types visible in this scope.
    job_types: BTreeMap<JobTypeName, JobType>,
    /// Options set in this scope only.
    globals: OptionSet,
}

impl RenderScope {
    /// Create an empty scope: no wrapping template, no job types, no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope seeded with the stock wrapping template, options and
    /// job types (`command`, `rake`, `script`, `runner`).
    ///
    /// `path` becomes the value of the `:path` option.
    pub fn with_defaults(path: impl Into<String>) -> Self {
        let mut scope = Self::new();
        scope.set_job_template(Some(DEFAULT_JOB_TEMPLATE.to_string()));

        scope.set_option("path", path);
        scope.set_option("environment_variable", "RAILS_ENV");
        scope.set_option("environment", "production");
        scope.set_option("bundle_command", "bundle exec");
        scope.set_option("runner_command", "bin/rails runner");
        scope.set_option("output", "");

        scope.define_job_type(JobType::new("command", ":task :output"));
        scope.define_job_type(JobType::new(
            "rake",
            "cd :path && :environment_variable=:environment :bundle_command rake :task --silent :output",
        ));
        scope.define_job_type(JobType::new(
            "script",
            "cd :path && :environment_variable=:environment :bundle_command script/:task :output",
        ));
        scope.define_job_type(JobType::new(
            "runner",
            "cd :path && :bundle_command :runner_command -e :environment ':task' :output",
        ));
        scope
    }

    /// Derive a child scope: job types and wrapping template are copied,
    /// global options start empty.
    fn child(&self) -> Self {
        Self {
            job_template: self.job_template.clone(),
            job_types: self.job_types.clone(),
            globals: OptionSet::new(),
        }
    }

    /// Set or clear the wrapping template.
    pub fn set_job_template(&mut self, template: Option<String>) {
        self.job_template = template;
    }

    /// Define a job type, shadowing any previous one of the same name.
    pub fn define_job_type(&mut self, job_type: JobType) {
        self.job_types.insert(job_type.name().clone(), job_type);
    }

    /// Set a global option on this scope.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.globals.set(name, value);
    }

    /// Apply a declaration to this scope.
    pub fn apply(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::Set { name, value } => self.set_option(name.as_str(), value.clone()),
            Declaration::JobTemplate(template) => self.set_job_template(template.clone()),
            Declaration::JobType(job_type) => self.define_job_type(job_type.clone()),
        }
    }

    /// Builder: apply several declarations in order.
    pub fn with_declarations<'a>(
        mut self,
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> Self {
        for declaration in declarations {
            self.apply(declaration);
        }
        self
    }

    /// Look up a job type by name.
    pub fn resolve_job_type(&self, name: &JobTypeName) -> Option<&JobType> {
        self.job_types.get(name)
    }

    /// Get the wrapping template.
    pub fn job_template(&self) -> Option<&str> {
        self.job_template.as_deref()
    }

    /// Get the job types visible in this scope, sorted by name.
    pub fn job_types(&self) -> impl Iterator<Item = &JobType> {
        self.job_types.values()
    }

    /// Get the options set on this scope.
    pub fn globals(&self) -> &OptionSet {
        &self.globals
    }
}

/// A stack of scopes for one render pass.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<RenderScope>,
}

impl ScopeStack {
    /// Create a stack whose outermost scope is `root`.
    pub fn new(root: RenderScope) -> Self {
        Self { scopes: vec![root] }
    }

    /// The innermost scope.
    pub fn current(&self) -> &RenderScope {
        // The root scope is never popped.
        &self.scopes[self.scopes.len() - 1]
    }

    /// Number of scopes on the stack, the root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a scope derived from the current one with `declarations` applied.
    /// The scope is popped when the returned guard is dropped.
    pub fn enter<'a>(
        &mut self,
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> ScopeGuard<'_> {
        let scope = self.current().child().with_declarations(declarations);
        self.scopes.push(scope);
        ScopeGuard { stack: self }
    }

    /// A resolver over `local` and the global options of every scope on the
    /// stack, nearest first.
    pub fn resolver<'a>(&'a self, local: &'a OptionSet) -> OptionResolver<'a> {
        OptionResolver::new(local, self.scopes.iter().rev().map(RenderScope::globals))
    }

    /// Look up a job type in the current scope.
    pub fn resolve_job_type(&self, name: &JobTypeName) -> Option<&JobType> {
        self.current().resolve_job_type(name)
    }
}

/// Keeps a pushed scope alive; pops it on drop.
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    stack: &'a mut ScopeStack,
}

impl Deref for ScopeGuard<'_> {
    type Target = ScopeStack;

    fn deref(&self) -> &ScopeStack {
        self.stack
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut ScopeStack {
        self.stack
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.stack.scopes.len() > 1 {
            self.stack.scopes.pop();
        }
    }
}
