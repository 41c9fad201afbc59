use grove::hooks::HookRunner;
use grove::project::{CheckoutRequest, Project, SyncOptions};

use crate::common::{TestRemote, git};

fn checkout_new(project: &Project, branch: &str) {
    let request = CheckoutRequest {
        name: branch.into(),
        create: true,
    };
    project
        .checkout(&request, &HookRunner::disabled(), project.root())
        .unwrap();
}

fn directory_names(project: &Project) -> Vec<String> {
    let mut names: Vec<String> = project
        .worktrees()
        .unwrap()
        .into_iter()
        .map(|wt| wt.directory_name)
        .collect();
    names.sort();
    names
}

#[test]
fn test_sync_prunes_worktree_of_deleted_remote_branch() {
    let remote = TestRemote::new(&["feature/gone", "feature/live"]);
    let root = remote.clone_project();
    let project = Project::at(&root);
    checkout_new(&project, "feature/gone");
    checkout_new(&project, "feature/live");

    remote.delete_branch("feature/gone");
    let report = project.sync(SyncOptions::default(), &root).unwrap();

    let removed: Vec<&str> = report
        .removed
        .iter()
        .map(|wt| wt.directory_name.as_str())
        .collect();
    assert_eq!(removed, vec!["feature-gone"]);
    assert!(report.failed.is_empty());
    assert_eq!(report.relocate_to, None);

    assert!(!root.join("feature-gone").exists());
    assert!(root.join("feature-live").exists());
    assert_eq!(directory_names(&project), vec!["feature-live", "main"]);
    assert!(!project.repo().local_branch_exists("feature/gone").unwrap());
}

#[test]
fn test_sync_never_removes_head() {
    let remote = TestRemote::new(&["develop"]);
    let root = remote.clone_project();
    let project = Project::at(&root);
    checkout_new(&project, "develop");

    // Even with every remote branch gone, the head worktree stays
    remote.delete_branch("develop");
    git(&remote.base().join("remote.git"), &["symbolic-ref", "HEAD", "refs/heads/develop"]);
    remote.delete_branch("main");
    let report = project.sync(SyncOptions::default(), &root).unwrap();

    assert!(report.stale.iter().all(|wt| !wt.is_head));
    assert!(root.join("main").exists());
    assert!(!root.join("develop").exists());
}

#[test]
fn test_sync_dry_run_changes_nothing() {
    let remote = TestRemote::new(&["feature/gone"]);
    let root = remote.clone_project();
    let project = Project::at(&root);
    checkout_new(&project, "feature/gone");
    checkout_new(&project, "local-only");

    remote.delete_branch("feature/gone");
    let report = project.sync(SyncOptions { dry_run: true }, &root).unwrap();

    let mut stale: Vec<&str> = report
        .stale
        .iter()
        .map(|wt| wt.directory_name.as_str())
        .collect();
    stale.sort_unstable();
    assert_eq!(stale, vec!["feature-gone", "local-only"]);
    assert!(report.dry_run);
    assert!(report.removed.is_empty());
    assert!(root.join("feature-gone").exists());
    assert!(root.join("local-only").exists());
    assert!(project.repo().local_branch_exists("feature/gone").unwrap());
}

#[test]
fn test_sync_with_nothing_stale() {
    let remote = TestRemote::new(&["feature"]);
    let root = remote.clone_project();
    let project = Project::at(&root);
    checkout_new(&project, "feature");

    let report = project.sync(SyncOptions::default(), &root).unwrap();
    assert!(report.is_empty());
    assert_eq!(directory_names(&project), vec!["feature", "main"]);
}
