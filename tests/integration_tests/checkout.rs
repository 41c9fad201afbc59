use grove::git::{GitError, is_git_error};
use grove::hooks::HookRunner;
use grove::project::{CheckoutOutcome, CheckoutRequest};

use crate::common::{TestProject, TestRemote, git};

fn switch(name: &str) -> CheckoutRequest {
    CheckoutRequest {
        name: name.into(),
        create: false,
    }
}

fn create(name: &str) -> CheckoutRequest {
    CheckoutRequest {
        name: name.into(),
        create: true,
    }
}

#[test]
fn test_create_new_branch_worktree() {
    let project = TestProject::new();
    let outcome = project
        .project()
        .checkout(&create("feature/login"), &HookRunner::disabled(), project.main())
        .unwrap();

    let expected = project.root().join("feature-login");
    assert_eq!(
        outcome,
        CheckoutOutcome {
            path: expected.clone(),
            created: true,
        }
    );
    assert_eq!(git(&expected, &["branch", "--show-current"]), "feature/login");
    assert!(project.branch_exists("feature/login"));
}

#[test]
fn test_create_uses_existing_local_branch() {
    let project = TestProject::new();
    git(project.main(), &["branch", "topic"]);

    let outcome = project
        .project()
        .checkout(&create("topic"), &HookRunner::disabled(), project.main())
        .unwrap();
    assert_eq!(git(&outcome.path, &["branch", "--show-current"]), "topic");
}

#[test]
fn test_create_existing_worktree_fails() {
    let project = TestProject::new();
    project.add_worktree("topic", "topic");

    let err = project
        .project()
        .checkout(&create("topic"), &HookRunner::disabled(), project.main())
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::AlreadyExists { .. })));
}

#[test]
fn test_create_directory_collision() {
    let project = TestProject::new();
    project.add_worktree("feature/login", "feature-login");

    let err = project
        .project()
        .checkout(&create("feature-login"), &HookRunner::disabled(), project.main())
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::DirectoryCollision { occupant, directory, .. }
            if occupant == "feature/login" && directory == "feature-login"
    )));
    assert!(!project.branch_exists("feature-login"));
}

#[test]
fn test_switch_exact_and_fuzzy() {
    let project = TestProject::new();
    let login = project.add_worktree("feature/login", "feature-login");
    project.add_worktree("bugfix", "bugfix");
    let grove = project.project();
    let hooks = HookRunner::disabled();

    let exact = grove.checkout(&switch("bugfix"), &hooks, project.main()).unwrap();
    assert_eq!(exact.path, project.root().join("bugfix"));
    assert!(!exact.created);

    // Substring
    let outcome = grove.checkout(&switch("login"), &hooks, project.main()).unwrap();
    assert_eq!(outcome.path, login);

    // Typo
    let outcome = grove.checkout(&switch("bugfx"), &hooks, project.main()).unwrap();
    assert_eq!(outcome.path, project.root().join("bugfix"));
}

#[test]
fn test_switch_ambiguous_lists_candidates() {
    let project = TestProject::new();
    project.add_worktree("feature-a", "feature-a");
    project.add_worktree("feature-b", "feature-b");

    let err = project
        .project()
        .checkout(&switch("feature"), &HookRunner::disabled(), project.main())
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::Ambiguous { candidates, .. } if candidates == &["feature-a", "feature-b"]
    )));
}

#[test]
fn test_switch_no_match_suggests_create() {
    let project = TestProject::new();
    let err = project
        .project()
        .checkout(&switch("xyzzy"), &HookRunner::disabled(), project.main())
        .unwrap_err();
    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::NoMatch { hint: Some(hint), .. } if hint.contains("--create")
    )));
}

#[test]
fn test_switch_falls_through_to_remote_branch() {
    let remote = TestRemote::new(&[]);
    let root = remote.clone_project();
    remote.push_branch("hotfix");
    git(&root, &["fetch", "--quiet", "origin"]);

    let project = grove::project::Project::at(&root);
    let outcome = project
        .checkout(&switch("hotfix"), &HookRunner::disabled(), &root.join("main"))
        .unwrap();

    assert!(outcome.created);
    assert_eq!(outcome.path, root.join("hotfix"));
    assert_eq!(
        git(&outcome.path, &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "origin/hotfix"
    );
}

#[test]
fn test_switch_to_branch_present_at_clone_time_tracks_remote() {
    let remote = TestRemote::new(&["feature"]);
    let root = remote.clone_project();

    let project = grove::project::Project::at(&root);
    assert!(project.repo().local_branch_exists("feature").unwrap());
    let outcome = project
        .checkout(&switch("feature"), &HookRunner::disabled(), &root.join("main"))
        .unwrap();

    assert!(outcome.created);
    assert_eq!(git(&outcome.path, &["branch", "--show-current"]), "feature");
    assert_eq!(
        git(&outcome.path, &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "origin/feature"
    );
}
