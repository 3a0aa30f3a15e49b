//! Chaining of nested job invocations into one compound command.
//!
//! A job with one nested job renders as `parent <op> child...`, where `<op>`
//! is `&&` when the parent halts on failure and `;` otherwise. Each link of the
//! chain is wrapped with the template of its own scope before joining. A job
//! with two or more nested jobs would need them to run side by side, which a
//! single command line cannot express.

use crate::core::job::{JobInvocation, JoinOperator};
use crate::core::scope::ScopeStack;

use super::RenderError;
use super::command::render_command;

/// Check that no invocation in the tree has more than one nested job.
///
/// Runs over the whole tree before anything is rendered, so a branch deep in
/// a chain still rejects the entry.
pub fn ensure_single_chain(invocation: &JobInvocation) -> Result<(), RenderError> {
    let mut current = invocation;
    loop {
        match current.children() {
            [] => return Ok(()),
            [child] => current = child,
            _ => return Err(RenderError::parallel(current)),
        }
    }
}

/// Join two rendered commands with an operator.
pub fn join(left: &str, operator: JoinOperator, right: &str) -> String {
    format!("{} {} {}", left, operator, right)
}

/// Render an invocation and everything nested in it as one command.
///
/// The invocation renders in the current scope of `stack`; its nested job
/// renders in a scope derived from it with the invocation's declarations
/// applied. That scope is popped again before returning, on success or error.
pub fn compose(stack: &mut ScopeStack, invocation: &JobInvocation) -> Result<String, RenderError> {
    let command = render_command(stack, invocation)?;

    match invocation.children() {
        [] => Ok(command),
        [child] => {
            let mut inner = stack.enter(invocation.declarations());
            let rest = compose(&mut inner, child)?;
            Ok(join(&command, invocation.join_operator(), &rest))
        }
        _ => Err(RenderError::parallel(invocation)),
    }
}
