//! Crontab output.
//!
//! Turns rendered entries into crontab lines of the form `<at> <command>`.
//! Cron reads an unescaped `%` in the command field as a newline, so every
//! `%` is escaped.

use crate::core::job_list::JobList;
use crate::core::template;
use crate::render::{RenderError, RenderedEntry, Renderer};

/// Crontab writer.
pub struct Crontab;

impl Crontab {
    /// Render every entry of a job list as crontab text, one line per job.
    ///
    /// Fails on the first entry that does not render; no partial output is
    /// returned.
    pub fn render(renderer: &Renderer, list: &JobList) -> Result<String, RenderError> {
        let entries = renderer.render_list(list)?;
        let mut out = String::new();
        for line in Self::lines(&entries) {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// The crontab lines for already rendered entries.
    pub fn lines(entries: &[RenderedEntry]) -> Vec<String> {
        entries
            .iter()
            .flat_map(|entry| {
                entry
                    .commands
                    .iter()
                    .map(move |command| Self::line(&entry.at, command))
            })
            .collect()
    }

    /// A single crontab line.
    pub fn line(at: &str, command: &str) -> String {
        format!("{} {}", at.trim(), clean_command(command))
    }
}

/// Squeeze whitespace runs, trim, and escape `%`.
fn clean_command(command: &str) -> String {
    template::squish(command).replace('%', "\\%")
}
