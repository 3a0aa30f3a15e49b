//! Schedule file integration tests.
//!
//! Tests that load YAML schedules and render them through the full pipeline.

use crate::common::{TEST_PATH, parse_schedule, write_schedule};
use cronplate::{ConfigError, RenderError, YamlLoader, load_job_list};

#[test]
fn test_defined_job_from_file() {
    let loaded = parse_schedule(
        r#"
job_template: null
job_types:
  some_job: "before :task after :option1"
set:
  option1: happy
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: during
"#,
    );

    let rendered = loaded.renderer.render_list(&loaded.list).unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].at, "0 */2 * * *");
    assert_eq!(rendered[0].commands, vec!["before during after happy"]);
}

#[test]
fn test_default_path_used_when_unset() {
    let loaded = parse_schedule(
        r#"
job_template: null
job_types:
  some_job: "cd :path && :task"
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: blahblah
"#,
    );

    let rendered = loaded.renderer.render_list(&loaded.list).unwrap();
    assert_eq!(rendered[0].commands, vec![format!("cd {} && blahblah", TEST_PATH)]);
}

#[test]
fn test_nested_jobs_from_file() {
    let loaded = parse_schedule(
        r#"
job_template: "|:job|"
job_types:
  some_job: "before :task after"
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: during
        job_template: "-:job-"
        job_types:
          another_job: "first :task last"
        jobs:
          - job: another_job
            task: then
"#,
    );

    let rendered = loaded.renderer.render_list(&loaded.list).unwrap();
    assert_eq!(
        rendered[0].commands,
        vec!["|before during after| && -first then last-"]
    );
}

#[test]
fn test_halt_on_failure_from_file() {
    let loaded = parse_schedule(
        r#"
job_template: null
job_types:
  some_job: "before :task after"
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: during
        halt_on_failure: false
        jobs:
          - job: some_job
            task: then
            jobs:
              - job: some_job
                task: else
"#,
    );

    let rendered = loaded.renderer.render_list(&loaded.list).unwrap();
    assert_eq!(
        rendered[0].commands,
        vec!["before during after ; before then after && before else after"]
    );
}

#[test]
fn test_branching_from_file_fails_at_render() {
    let loaded = parse_schedule(
        r#"
job_template: null
job_types:
  some_job: "before :task after"
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: during
        jobs:
          - job: some_job
            task: then
          - job: some_job
            task: else
"#,
    );

    let result = loaded.renderer.render_list(&loaded.list);
    assert!(matches!(
        result,
        Err(RenderError::ParallelJobsNotSupported { .. })
    ));
}

#[test]
fn test_load_from_disk() {
    let file = write_schedule(
        r#"
path: /srv/app
every:
  - at: "@reboot"
    jobs:
      - job: runner
        task: Cache.warm
"#,
    );

    let loaded = load_job_list(file.path(), TEST_PATH).unwrap();
    let rendered = loaded.renderer.render_list(&loaded.list).unwrap();
    assert_eq!(rendered[0].at, "@reboot");
    assert_eq!(
        rendered[0].commands,
        vec![
            r"/bin/bash -l -c 'cd /srv/app && bundle exec bin/rails runner -e production '\''Cache.warm'\'''"
        ]
    );
}

#[test]
fn test_invalid_time_expression() {
    let file = write_schedule(
        r#"
every:
  - at: "61 * * * *"
    jobs:
      - job: command
        task: ls
"#,
    );

    let result = load_job_list(file.path(), TEST_PATH);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_unknown_shortcut() {
    let result = YamlLoader::parse_job_list(
        r#"
every:
  - at: "@fortnightly"
    jobs:
      - job: command
        task: ls
"#,
    );
    assert!(matches!(result, Err(ConfigError::InvalidConfig(ref msg)) if msg.contains("@fortnightly")));
}

#[test]
fn test_missing_file() {
    let result = load_job_list("/nonexistent/schedule.yaml", TEST_PATH);
    assert!(matches!(result, Err(ConfigError::FileReadError { .. })));
}
