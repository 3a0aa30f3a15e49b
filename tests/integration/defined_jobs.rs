//! Defined job type integration tests.
//!
//! Single invocations: tasks, local and global options, unresolved
//! placeholders and the stock job types.

use crate::common::{TEST_PATH, some_job, some_job_harness};
use cronplate::testing::RenderHarness;
use cronplate::{Declaration, JobInvocation, OptionSet, RenderError};

#[test]
fn test_defined_job_with_task() {
    some_job_harness().assert_renders(&some_job("during"), "before during after");
}

#[test]
fn test_defined_job_with_task_and_options() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", "before :task after :option1 :option2");

    let job = some_job("during")
        .with_option("option1", "happy")
        .with_option("option2", "birthday");

    harness.assert_renders(&job, "before during after happy birthday");
}

#[test]
fn test_option_set_globally() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", "before :task after :option1")
        .with_option("option1", "happy");

    harness.assert_renders(&some_job("during"), "before during after happy");
}

#[test]
fn test_local_option_overrides_global() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", "before :task after :option1")
        .with_option("option1", "global");

    let job = some_job("during").with_option("option1", "local");
    harness.assert_renders(&job, "before during after local");
}

#[test]
fn test_unset_option_left_untouched() {
    let harness = RenderHarness::new().with_job_type("some_job", "before :task after :option1");

    let job = some_job("during").with_option("option2", "happy");
    harness.assert_renders(&job, "before during after :option1");
}

#[test]
fn test_path_from_base_scope() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", "cd :path && :task")
        .with_option("path", TEST_PATH);

    harness.assert_renders(&some_job("blahblah"), "cd /my/path && blahblah");
}

#[test]
fn test_substituted_values_are_not_rescanned() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", ":task :option1")
        .with_option("option1", ":option2")
        .with_option("option2", "never");

    harness.assert_renders(&some_job("echo :option1"), "echo :option1 :option2");
}

#[test]
fn test_task_option_cannot_override_task() {
    let job = some_job("during").with_options(OptionSet::new().with("task", "other"));
    some_job_harness().assert_renders(&job, "before during after");
}

#[test]
fn test_wrapping_template_escapes_quotes() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", "echo ':task'")
        .with_job_template("bash -c ':job'");

    harness.assert_renders(&some_job("hi"), r"bash -c 'echo '\''hi'\'''");
}

#[test]
fn test_undefined_job_type() {
    let err = some_job_harness().assert_fails(&JobInvocation::new("another_job", "then"));
    assert_eq!(
        err,
        RenderError::UndefinedJobType {
            job_type: "another_job".into(),
            task: "then".into(),
        }
    );
}

#[test]
fn test_stock_job_types() {
    let harness = RenderHarness::with_defaults(TEST_PATH)
        .with_declaration(Declaration::job_template(None));

    harness.assert_renders(&JobInvocation::new("command", "ls -la"), "ls -la");
    harness.assert_renders(
        &JobInvocation::new("rake", "db:migrate"),
        "cd /my/path && RAILS_ENV=production bundle exec rake db:migrate --silent",
    );
    harness.assert_renders(
        &JobInvocation::new("script", "cleanup"),
        "cd /my/path && RAILS_ENV=production bundle exec script/cleanup",
    );
    harness.assert_renders(
        &JobInvocation::new("runner", "Report.send"),
        "cd /my/path && bundle exec bin/rails runner -e production 'Report.send'",
    );
}

#[test]
fn test_stock_job_types_with_overrides() {
    let harness = RenderHarness::with_defaults(TEST_PATH)
        .with_option("environment", "staging")
        .with_option("output", ">> /var/log/cron.log 2>&1");

    harness.assert_renders(
        &JobInvocation::new("rake", "cache:clear"),
        "/bin/bash -l -c 'cd /my/path && RAILS_ENV=staging bundle exec rake cache:clear --silent >> /var/log/cron.log 2>&1'",
    );
}

#[test]
fn test_runner_task_with_quotes() {
    let harness = RenderHarness::with_defaults(TEST_PATH);
    let job = JobInvocation::new("runner", "puts 'hi'");

    harness
        .clone()
        .with_declaration(Declaration::job_template(None))
        .assert_renders(
            &job,
            r"cd /my/path && bundle exec bin/rails runner -e production 'puts '\''hi'\'''",
        );
    harness.assert_renders(
        &job,
        r"/bin/bash -l -c 'cd /my/path && bundle exec bin/rails runner -e production '\''puts '\''\'\'''\''hi'\''\'\'''\'''\'''",
    );
}

#[test]
fn test_empty_output_leaves_no_space_inside_wrapper() {
    let harness = RenderHarness::with_defaults(TEST_PATH);
    harness.assert_renders(
        &JobInvocation::new("command", "echo hi"),
        "/bin/bash -l -c 'echo hi'",
    );
}
