//! Common test utilities shared across integration tests.

use cronplate::testing::RenderHarness;
use cronplate::{Crontab, JobInvocation, LoadedJobList, YamlLoader, load_job_list};
use std::io::Write;
use tempfile::NamedTempFile;

/// Path used whenever a test needs `:path` and the schedule sets none.
pub const TEST_PATH: &str = "/my/path";

/// An invocation of the `some_job` job type.
pub fn some_job(task: &str) -> JobInvocation {
    JobInvocation::new("some_job", task)
}

/// A harness with wrapping disabled and `some_job` defined as
/// `before :task after`.
pub fn some_job_harness() -> RenderHarness {
    RenderHarness::new().with_job_type("some_job", "before :task after")
}

/// Write a schedule file to a temporary location.
///
/// The file is removed when the returned handle is dropped.
pub fn write_schedule(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

/// Parse a schedule from YAML, with [`TEST_PATH`] as the default path.
pub fn parse_schedule(yaml: &str) -> LoadedJobList {
    let config = YamlLoader::parse_job_list(yaml).unwrap();
    LoadedJobList::from_config(&config, TEST_PATH).unwrap()
}

/// Load a schedule through a file on disk and render it as crontab text.
///
/// # Panics
///
/// Panics if the schedule fails to load or render.
pub fn crontab_for(yaml: &str) -> String {
    let file = write_schedule(yaml);
    let loaded = load_job_list(file.path(), TEST_PATH).unwrap();
    Crontab::render(&loaded.renderer, &loaded.list).unwrap()
}
