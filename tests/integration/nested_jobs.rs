//! Nested job integration tests.
//!
//! Chains of nested invocations, their join operators, block scoping, and
//! rejection of jobs that branch.

use crate::common::{some_job, some_job_harness};
use cronplate::testing::RenderHarness;
use cronplate::{Declaration, JobInvocation, RenderError, Renderer, Schedule, ScheduleEntry};

#[test]
fn test_nested_chain_halts_on_failure() {
    let job = some_job("during").with_child(some_job("then").with_child(some_job("else")));

    some_job_harness().assert_renders(
        &job,
        "before during after && before then after && before else after",
    );
}

#[test]
fn test_nested_chain_continue_on_failure() {
    let job = some_job("during")
        .with_halt_on_failure(false)
        .with_child(some_job("then").with_child(some_job("else")));

    some_job_harness().assert_renders(
        &job,
        "before during after ; before then after && before else after",
    );
}

#[test]
fn test_halt_flag_of_leaf_is_unused() {
    let job = some_job("during").with_child(some_job("then").with_halt_on_failure(false));
    some_job_harness().assert_renders(&job, "before during after && before then after");
}

#[test]
fn test_two_nested_jobs_fail() {
    let job = some_job("during").with_children([some_job("then"), some_job("else")]);

    let err = some_job_harness().assert_fails(&job);
    assert_eq!(
        err,
        RenderError::ParallelJobsNotSupported {
            job_type: "some_job".into(),
            task: "during".into(),
            children: 2,
        }
    );
}

#[test]
fn test_branch_with_deep_first_child_fails() {
    let job = some_job("during").with_children([
        some_job("then").with_child(some_job("other 1").with_child(some_job("other 2"))),
        some_job("else"),
    ]);

    let err = some_job_harness().assert_fails(&job);
    assert!(matches!(
        err,
        RenderError::ParallelJobsNotSupported { ref task, children: 2, .. } if task == "during"
    ));
}

#[test]
fn test_branch_deep_in_chain_fails() {
    let job = some_job("1").with_child(
        some_job("2").with_child(some_job("3").with_children([some_job("4a"), some_job("4b")])),
    );

    let err = some_job_harness().assert_fails(&job);
    assert!(matches!(
        err,
        RenderError::ParallelJobsNotSupported { ref task, .. } if task == "3"
    ));
}

#[test]
fn test_block_template_and_job_type() {
    let harness = some_job_harness().with_job_template("|:job|");

    let job = some_job("during")
        .with_declaration(Declaration::job_template(Some("-:job-")))
        .with_declaration(Declaration::job_type("another_job", "first :task last"))
        .with_child(JobInvocation::new("another_job", "then"));

    harness.assert_renders(&job, "|before during after| && -first then last-");
}

#[test]
fn test_block_job_type_not_visible_after_block() {
    let harness = some_job_harness();

    let nested = some_job("during")
        .with_declaration(Declaration::job_type("another_job", "first :task last"))
        .with_child(JobInvocation::new("another_job", "then"));
    harness.assert_renders(&nested, "before during after && first then last");

    let err = harness.assert_fails(&JobInvocation::new("another_job", "later"));
    assert!(matches!(err, RenderError::UndefinedJobType { .. }));
}

#[test]
fn test_block_job_type_not_visible_to_parent() {
    let job = JobInvocation::new("another_job", "during")
        .with_declaration(Declaration::job_type("another_job", "first :task last"))
        .with_child(some_job("then"));

    let err = some_job_harness().assert_fails(&job);
    assert!(matches!(
        err,
        RenderError::UndefinedJobType { ref task, .. } if task == "during"
    ));
}

#[test]
fn test_block_globals_resolve_nearest_first() {
    let harness = RenderHarness::new()
        .with_job_type("some_job", ":task :option1 :option2")
        .with_option("option1", "outer")
        .with_option("option2", "root");

    let job = some_job("a")
        .with_declaration(Declaration::set("option1", "middle"))
        .with_child(
            some_job("b")
                .with_declaration(Declaration::set("option1", "inner"))
                .with_child(some_job("c").with_option("option2", "local")),
        );

    harness.assert_renders(
        &job,
        "a outer root && b middle root && c inner local",
    );
}

#[test]
fn test_block_clears_template() {
    let harness = some_job_harness().with_job_template("[:job]");

    let job = some_job("during")
        .with_declaration(Declaration::job_template(None))
        .with_child(some_job("then").with_child(some_job("else")));

    harness.assert_renders(
        &job,
        "[before during after] && before then after && before else after",
    );
}

#[test]
fn test_entry_with_multiple_top_level_jobs() {
    let renderer: Renderer = some_job_harness().renderer();
    let entry = ScheduleEntry::new(Schedule::new("0 */2 * * *").unwrap())
        .with_job(some_job("one").with_child(some_job("two")))
        .with_job(some_job("three"));

    let rendered = renderer.render_entry(&entry).unwrap();
    assert_eq!(
        rendered.commands,
        vec!["before one after && before two after", "before three after"]
    );
}
