//! Crontab output integration tests.

use crate::common::crontab_for;

#[test]
fn test_crontab_lines_for_every_job() {
    let crontab = crontab_for(
        r#"
job_template: null
job_types:
  some_job: "before :task after"
every:
  - at: "0 */2 * * *"
    jobs:
      - job: some_job
        task: during
      - job: some_job
        task: again
  - at: "@weekly"
    jobs:
      - job: some_job
        task: weekly
"#,
    );

    assert_eq!(
        crontab,
        "0 */2 * * * before during after\n0 */2 * * * before again after\n@weekly before weekly after\n"
    );
}

#[test]
fn test_crontab_escapes_percent_and_squeezes_whitespace() {
    let crontab = crontab_for(
        r#"
job_template: null
every:
  - at: "5 0 * * 1-5"
    jobs:
      - job: command
        task: "tar czf backup-$(date +%F).tgz   /srv"
"#,
    );

    assert_eq!(crontab, "5 0 * * 1-5 tar czf backup-$(date +\\%F).tgz /srv\n");
}

#[test]
fn test_crontab_with_output_redirection() {
    let crontab = crontab_for(
        r#"
output:
  standard: /var/log/out.log
  error: /var/log/err.log
every:
  - at: "@hourly"
    jobs:
      - job: command
        task: ls
"#,
    );

    assert_eq!(
        crontab,
        "@hourly /bin/bash -l -c 'ls >> /var/log/out.log 2>> /var/log/err.log'\n"
    );
}

#[test]
fn test_empty_schedule_renders_nothing() {
    assert_eq!(crontab_for("every: []"), "");
}
