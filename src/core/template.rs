//! Placeholder substitution for job and wrapping templates.
//!
//! A placeholder is the `:` sigil followed by a maximal run of ASCII word
//! characters, so `:option1` never matches as `:option`. Substitution is a
//! single pass over the template: values are inserted as opaque text and never
//! re-scanned, even when they look like placeholders themselves.
//!
//! ```
//! use cronplate::{OptionSet, template};
//!
//! let options = OptionSet::new().with("option1", "happy");
//! let cmd = template::fill("before :task after :option1 :option2", "during", &options);
//! assert_eq!(cmd, "before during after happy :option2");
//! ```

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::options::OptionLookup;

/// Reserved token replaced by the invocation's task.
pub const TASK: &str = "task";

/// Reserved token replaced by the filled job command inside a wrapping template.
pub const JOB: &str = "job";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_]+)").expect("placeholder pattern compiles"));

/// Fill a job-type template with a task and options.
///
/// Every `:task` becomes `task`. Every other placeholder is looked up in
/// `options`; unresolved ones are left as they are. A value placed between
/// matching quotes (`':task'`) has those quotes escaped so the result stays a
/// single shell word.
pub fn fill(template: &str, task: &str, options: &dyn OptionLookup) -> String {
    substitute(template, &[(TASK, task)], options)
}

/// Apply a wrapping template around an already filled job command.
///
/// `:job` becomes the command, `:task` the invocation's task, and other
/// placeholders resolve through `options`. Quoted values are escaped as in
/// [`fill`].
pub fn wrap(wrapper: &str, job: &str, task: &str, options: &dyn OptionLookup) -> String {
    substitute(wrapper, &[(JOB, job), (TASK, task)], options)
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn squish(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Names of all placeholders referenced by a template, in order of first
/// appearance, without duplicates.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        if let Some(m) = caps.get(1)
            && !names.contains(&m.as_str())
        {
            names.push(m.as_str());
        }
    }
    names
}

fn substitute(template: &str, reserved: &[(&str, &str)], options: &dyn OptionLookup) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let name = &caps[1];

            let value = reserved
                .iter()
                .find(|(token, _)| *token == name)
                .map(|(_, value)| *value)
                .or_else(|| options.lookup(name));

            let Some(value) = value else {
                return whole.to_string();
            };

            let span = caps.get(0).map(|m| (m.start(), m.end()));
            match span.and_then(|(start, end)| enclosing_quote(template, start, end)) {
                Some('\'') => escape_single_quotes(value),
                Some('"') => escape_double_quotes(value),
                _ => value.to_string(),
            }
        })
        .into_owned()
}

/// The quote character surrounding `template[start..end]` on both sides, if any.
fn enclosing_quote(template: &str, start: usize, end: usize) -> Option<char> {
    let before = template[..start].chars().next_back()?;
    let after = template[end..].chars().next()?;
    (before == after && (before == '\'' || before == '"')).then_some(before)
}

fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', r"'\''")
}

fn escape_double_quotes(value: &str) -> String {
    value.replace('"', r#"\""#)
}
