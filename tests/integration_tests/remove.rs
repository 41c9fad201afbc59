use grove::git::{GitError, is_git_error};
use grove::hooks::HookRunner;
use grove::project::{RemoveOptions, WorktreeEntry};

use crate::common::{TestProject, git};

fn options(name: &str) -> RemoveOptions {
    RemoveOptions {
        name: name.into(),
        force: false,
        yes: true,
    }
}

fn never_asked(_: &WorktreeEntry) -> anyhow::Result<bool> {
    panic!("confirmation should not be requested");
}

#[test]
fn test_remove_worktree_and_branch() {
    let project = TestProject::new();
    let path = project.add_worktree("feature/login", "feature-login");

    let outcome = project
        .project()
        .remove(&options("login"), &HookRunner::disabled(), project.root(), never_asked)
        .unwrap();

    assert_eq!(outcome.removed.directory_name, "feature-login");
    assert_eq!(outcome.removed.branch_name.as_deref(), Some("feature/login"));
    assert_eq!(outcome.relocate_to, None);
    assert!(!path.exists());
    assert!(!project.branch_exists("feature/login"));
}

#[test]
fn test_remove_resolves_branch_name() {
    let project = TestProject::new();
    let path = project.add_worktree("feature/login", "feature-login");

    project
        .project()
        .remove(
            &options("feature/login"),
            &HookRunner::disabled(),
            project.root(),
            never_asked,
        )
        .unwrap();
    assert!(!path.exists());
}

#[test]
fn test_remove_head_requires_force() {
    let project = TestProject::new();
    let err = project
        .project()
        .remove(&options("main"), &HookRunner::disabled(), project.root(), never_asked)
        .unwrap_err();

    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::HeadWorktreeProtected { directory } if directory == "main"
    )));
    assert!(project.main().exists());
}

#[test]
fn test_remove_declined_changes_nothing() {
    let project = TestProject::new();
    let path = project.add_worktree("topic", "topic");
    let mut asked = None;

    let err = project
        .project()
        .remove(
            &RemoveOptions {
                yes: false,
                ..options("topic")
            },
            &HookRunner::disabled(),
            project.root(),
            |entry| {
                asked = Some(entry.directory_name.clone());
                Ok(false)
            },
        )
        .unwrap_err();

    assert!(is_git_error(&err, |e| matches!(e, GitError::Aborted)));
    assert_eq!(asked.as_deref(), Some("topic"));
    assert!(path.exists());
    assert!(project.branch_exists("topic"));
}

#[test]
fn test_remove_unmerged_branch_keeps_branch_without_force() {
    let project = TestProject::new();
    let path = project.add_worktree("wip", "wip");
    std::fs::write(path.join("wip.txt"), "work\n").unwrap();
    git(&path, &["add", "wip.txt"]);
    git(&path, &["commit", "--quiet", "-m", "Work in progress"]);

    project
        .project()
        .remove(&options("wip"), &HookRunner::disabled(), project.root(), never_asked)
        .unwrap();

    // The worktree is gone; the unmerged branch survives with a warning
    assert!(!path.exists());
    assert!(project.branch_exists("wip"));
}

#[test]
fn test_remove_dirty_worktree_requires_force() {
    let project = TestProject::new();
    let path = project.add_worktree("dirty", "dirty");
    std::fs::write(path.join("untracked.txt"), "scratch\n").unwrap();

    let err = project
        .project()
        .remove(&options("dirty"), &HookRunner::disabled(), project.root(), never_asked)
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::StepFailed { .. })));
    assert!(path.exists());

    project
        .project()
        .remove(
            &RemoveOptions {
                force: true,
                ..options("dirty")
            },
            &HookRunner::disabled(),
            project.root(),
            never_asked,
        )
        .unwrap();
    assert!(!path.exists());
    assert!(!project.branch_exists("dirty"));
}

#[test]
fn test_remove_unknown_name() {
    let project = TestProject::new();
    let err = project
        .project()
        .remove(&options("xyzzy"), &HookRunner::disabled(), project.root(), never_asked)
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::NoMatch { .. })));
}
