//! Setup hook behavior as seen through checkout.
#![cfg(unix)]

use grove::config::Settings;
use grove::git::{GitError, is_git_error};
use grove::hooks::HookRunner;
use grove::project::CheckoutRequest;

use crate::common::TestProject;
use crate::common::mock_commands::{MockBranch, create_mock_command, mock_calls};

fn create(name: &str) -> CheckoutRequest {
    CheckoutRequest {
        name: name.into(),
        create: true,
    }
}

fn mock_mise(project: &TestProject, branches: &[MockBranch]) -> HookRunner {
    let bin = project.base().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    HookRunner::with_tool(create_mock_command(&bin, "mise", branches, 0))
}

fn calls(project: &TestProject) -> Vec<String> {
    mock_calls(&project.base().join("bin"), "mise")
}

#[test]
fn test_setup_runs_after_trust_propagation() {
    let project = TestProject::new();
    let hooks = mock_mise(
        &project,
        &[MockBranch::ok("trust --show", vec!["~/repo/main: trusted"])],
    );

    let outcome = project
        .project()
        .checkout(&create("feature"), &hooks, project.main())
        .unwrap();

    assert_eq!(
        calls(&project),
        vec![
            "trust --show".to_string(),
            format!("trust {}", outcome.path.display()),
            "run setup".to_string(),
        ]
    );
}

#[test]
fn test_untrusted_source_only_runs_setup() {
    let project = TestProject::new();
    let hooks = mock_mise(
        &project,
        &[MockBranch::ok("trust --show", vec!["~/repo/main: untrusted"])],
    );

    project
        .project()
        .checkout(&create("feature"), &hooks, project.main())
        .unwrap();
    assert_eq!(calls(&project), vec!["trust --show", "run setup"]);
}

#[test]
fn test_configured_task_and_disabled_trust() {
    let project = TestProject::new();
    let repo = project.project().repo().clone();
    Settings::set_trust(&repo, false).unwrap();
    Settings::set_setup_task(&repo, "bootstrap").unwrap();
    let hooks = mock_mise(&project, &[]);

    project
        .project()
        .checkout(&create("feature"), &hooks, project.main())
        .unwrap();
    assert_eq!(calls(&project), vec!["run bootstrap"]);
}

#[test]
fn test_undefined_task_keeps_worktree() {
    let project = TestProject::new();
    let hooks = mock_mise(
        &project,
        &[MockBranch::fail("run *", vec!["mise ERROR no task setup found"], 1)],
    );

    let outcome = project
        .project()
        .checkout(&create("feature"), &hooks, project.main())
        .unwrap();
    assert!(outcome.created);
    assert!(outcome.path.exists());
}

#[test]
fn test_failed_setup_discards_new_branch_and_worktree() {
    let project = TestProject::new();
    let hooks = mock_mise(
        &project,
        &[MockBranch::fail("run *", vec!["npm install exploded"], 2)],
    );

    let err = project
        .project()
        .checkout(&create("feature"), &hooks, project.main())
        .unwrap_err();

    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::HookFailed { message } if message.contains("npm install exploded")
    )));
    assert!(!project.root().join("feature").exists());
    assert!(!project.branch_exists("feature"));
    let listed: Vec<String> = project
        .project()
        .worktrees()
        .unwrap()
        .into_iter()
        .map(|wt| wt.directory_name)
        .collect();
    assert_eq!(listed, vec!["main"]);
}

#[test]
fn test_failed_setup_deletes_checked_out_branch() {
    let project = TestProject::new();
    crate::common::git(project.main(), &["branch", "topic"]);
    let hooks = mock_mise(&project, &[MockBranch::fail("run *", vec!["boom"], 1)]);

    project
        .project()
        .checkout(&create("topic"), &hooks, project.main())
        .unwrap_err();

    assert!(!project.root().join("topic").exists());
    assert!(!project.branch_exists("topic"));
}
