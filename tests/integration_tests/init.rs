use std::fs;

use grove::git::{GitError, is_git_error};
use grove::path::POINTER_CONTENT;
use grove::project::init;

use crate::common::{TestProject, TestRepo, entries, git};

#[test]
fn test_init_moves_everything_into_branch_worktree() {
    let repo = TestRepo::new();
    repo.write("src/lib.rs", "pub fn hello() {}\n");
    repo.commit_all("Add source");
    // Uncommitted work: a modification and an untracked file
    repo.write("README.md", "# repo\n\nedited\n");
    repo.write("notes.txt", "scratch\n");
    let root = repo.root().to_path_buf();

    let outcome = init::convert(&root).unwrap();
    assert_eq!(outcome.branch, "main");
    assert_eq!(outcome.worktree, root.join("main"));
    assert!(!outcome.repaired);

    assert_eq!(entries(&root), vec![".git", ".store", "main"]);
    assert_eq!(fs::read_to_string(root.join(".git")).unwrap(), POINTER_CONTENT);
    assert_eq!(
        fs::read_to_string(root.join("main/README.md")).unwrap(),
        "# repo\n\nedited\n"
    );
    assert!(root.join("main/src/lib.rs").is_file());
    assert!(root.join("main/.git").is_file());

    // Uncommitted changes come back as uncommitted changes
    let status = git(&root.join("main"), &["status", "--porcelain"]);
    assert_eq!(status, "M README.md\n?? notes.txt");
}

#[test]
fn test_init_store_is_bare_and_worktree_is_not() {
    let project = TestProject::new();
    assert_eq!(
        git(project.root(), &["rev-parse", "--is-bare-repository"]),
        "true"
    );
    assert_eq!(
        git(project.main(), &["rev-parse", "--is-bare-repository"]),
        "false"
    );
    assert_eq!(git(project.main(), &["branch", "--show-current"]), "main");
    assert_eq!(git(project.main(), &["status", "--porcelain"]), "");
}

#[test]
fn test_init_twice_repairs_and_returns_same_worktree() {
    let project = TestProject::new();
    let outcome = init::convert(project.root()).unwrap();
    assert!(outcome.repaired);
    assert_eq!(outcome.worktree, project.main());
    assert_eq!(entries(project.root()), vec![".git", ".store", "main"]);
}

#[test]
fn test_init_inside_project_is_rejected() {
    let project = TestProject::new();
    let err = init::convert(project.main()).unwrap_err();
    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::AlreadyInitialized { root, .. } if root == project.root()
    )));
}

#[test]
fn test_init_outside_repository() {
    let repo = TestRepo::new();
    let plain = repo.base().join("plain");
    fs::create_dir(&plain).unwrap();
    let err = init::convert(&plain).unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::NotARepository { .. })));
}

#[test]
fn test_init_rolls_back_when_worktree_directory_is_taken() {
    let repo = TestRepo::new();
    // A tracked directory with the same name as the branch
    repo.write("main/config.txt", "tracked\n");
    repo.commit_all("Add main directory");
    repo.write("README.md", "# repo\n\nuncommitted\n");
    let root = repo.root().to_path_buf();

    let err = init::convert(&root).unwrap_err();
    assert!(is_git_error(&err, |e| matches!(
        e,
        GitError::StepFailed { step, .. } if step.starts_with("Failed to create worktree directory")
    )));

    // Back to a plain repository with the uncommitted change intact
    assert!(root.join(".git").is_dir());
    assert!(!root.join(".store").exists());
    assert_eq!(entries(&root), vec![".git", "README.md", "main"]);
    assert_eq!(
        fs::read_to_string(root.join("README.md")).unwrap(),
        "# repo\n\nuncommitted\n"
    );
    assert_eq!(git(&root, &["rev-parse", "--is-bare-repository"]), "false");
    assert_eq!(git(&root, &["status", "--porcelain"]), "M README.md");
    assert_eq!(git(&root, &["stash", "list"]), "");
}

#[test]
fn test_repair_recreates_missing_pointer() {
    let project = TestProject::new();
    fs::remove_file(project.root().join(".git")).unwrap();

    let outcome = init::convert(project.root()).unwrap();
    assert!(outcome.repaired);
    assert_eq!(
        fs::read_to_string(project.root().join(".git")).unwrap(),
        POINTER_CONTENT
    );
}

#[test]
fn test_repair_relinks_unlinked_worktree_directory() {
    let project = TestProject::new();
    fs::remove_file(project.main().join(".git")).unwrap();

    init::convert(project.root()).unwrap();
    assert!(project.main().join(".git").is_file());
    assert_eq!(git(project.main(), &["branch", "--show-current"]), "main");
    assert_eq!(git(project.main(), &["status", "--porcelain"]), "");
}

#[test]
fn test_repair_recreates_deleted_worktree() {
    let project = TestProject::new();
    fs::remove_dir_all(project.main()).unwrap();

    let outcome = init::convert(project.root()).unwrap();
    assert_eq!(outcome.worktree, project.main());
    assert_eq!(
        fs::read_to_string(project.main().join("README.md")).unwrap(),
        "# repo\n"
    );
}
