//! Rendering of a single invocation, without its nested jobs.

use crate::core::job::JobInvocation;
use crate::core::scope::ScopeStack;
use crate::core::template;

use super::RenderError;

/// Fill the invocation's job type template and apply the wrapping template
/// of the current scope.
pub(crate) fn render_command(
    stack: &ScopeStack,
    invocation: &JobInvocation,
) -> Result<String, RenderError> {
    let job_type = stack
        .resolve_job_type(invocation.job_type())
        .ok_or_else(|| RenderError::undefined(invocation))?;

    let resolver = stack.resolver(invocation.options());
    // Empty options leave stray spaces that would end up inside the wrapper's quotes
    let job = template::squish(&template::fill(
        job_type.template(),
        invocation.task(),
        &resolver,
    ));

    let command = match stack.current().job_template() {
        Some(wrapper) => template::wrap(wrapper, &job, invocation.task(), &resolver),
        None => job,
    };

    tracing::debug!(
        job_type = %invocation.job_type(),
        task = invocation.task(),
        depth = stack.depth(),
        command = %command,
        "Rendered job"
    );
    Ok(command)
}
