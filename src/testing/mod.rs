//! Testing utilities for users of the cronplate library.
//!
//! This module provides helpers for testing job definitions:
//!
//! - [`RecordingLookup`]: An option source that records which names were asked for
//! - [`RenderHarness`]: Renders invocations against a scope built up in place

use std::cell::RefCell;

use crate::core::job::{Declaration, JobInvocation};
use crate::core::options::{OptionLookup, OptionSet};
use crate::core::scope::RenderScope;
use crate::render::{RenderError, Renderer};

/// An option source that records every lookup.
///
/// Useful to check which placeholders a template asks for, including the ones
/// that stay unresolved.
///
/// # Example
///
/// ```
/// use cronplate::template;
/// use cronplate::testing::RecordingLookup;
///
/// let lookup = RecordingLookup::new().with("option1", "happy");
/// let cmd = template::fill(":task :option1 :option2", "during", &lookup);
///
/// assert_eq!(cmd, "during happy :option2");
/// assert_eq!(lookup.requested(), vec!["option1", "option2"]);
/// assert_eq!(lookup.unresolved(), vec!["option2"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingLookup {
    options: OptionSet,
    requested: RefCell<Vec<String>>,
}

impl RecordingLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing option set.
    pub fn from_options(options: OptionSet) -> Self {
        Self {
            options,
            requested: RefCell::default(),
        }
    }

    /// Builder: add an option.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.set(name, value);
        self
    }

    /// Names looked up so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }

    /// Names looked up that had no value.
    pub fn unresolved(&self) -> Vec<String> {
        self.requested
            .borrow()
            .iter()
            .filter(|name| !self.options.contains(name))
            .cloned()
            .collect()
    }

    /// Forget recorded lookups.
    pub fn clear(&self) {
        self.requested.borrow_mut().clear();
    }
}

impl OptionLookup for RecordingLookup {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.requested.borrow_mut().push(name.to_string());
        self.options.get(name)
    }
}

/// A harness for rendering jobs in tests.
///
/// # Example
///
/// ```
/// use cronplate::JobInvocation;
/// use cronplate::testing::RenderHarness;
///
/// let harness = RenderHarness::new()
///     .with_job_type("some_job", "before :task after")
///     .with_job_template("|:job|");
///
/// let nested = JobInvocation::new("some_job", "during")
///     .with_child(JobInvocation::new("some_job", "then"));
///
/// harness.assert_renders(&nested, "|before during after| && |before then after|");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderHarness {
    scope: RenderScope,
}

impl RenderHarness {
    /// Create a harness over an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a harness over the stock declarations.
    pub fn with_defaults(path: impl Into<String>) -> Self {
        Self {
            scope: RenderScope::with_defaults(path),
        }
    }

    /// Define a job type in the base scope.
    pub fn with_job_type(self, name: &str, template: &str) -> Self {
        self.with_declaration(Declaration::job_type(name, template))
    }

    /// Set the wrapping template of the base scope.
    pub fn with_job_template(self, template: &str) -> Self {
        self.with_declaration(Declaration::job_template(Some(template)))
    }

    /// Set a global option in the base scope.
    pub fn with_option(self, name: &str, value: &str) -> Self {
        self.with_declaration(Declaration::set(name, value))
    }

    /// Apply any declaration to the base scope.
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.scope.apply(&declaration);
        self
    }

    /// The base scope.
    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }

    /// A renderer over the base scope.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.scope.clone())
    }

    /// Render an invocation.
    pub fn render(&self, invocation: &JobInvocation) -> Result<String, RenderError> {
        self.renderer().render_invocation(invocation)
    }

    /// Render and assert the exact command.
    pub fn assert_renders(&self, invocation: &JobInvocation, expected: &str) {
        match self.render(invocation) {
            Ok(command) => assert_eq!(command, expected, "rendering {}", invocation),
            Err(e) => panic!("Expected {} to render, but it failed: {}", invocation, e),
        }
    }

    /// Render and assert failure, returning the error.
    pub fn assert_fails(&self, invocation: &JobInvocation) -> RenderError {
        match self.render(invocation) {
            Ok(command) => panic!(
                "Expected {} to fail, but it rendered: {}",
                invocation, command
            ),
            Err(e) => e,
        }
    }
}
