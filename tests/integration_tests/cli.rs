//! The binary: exit codes, stdout paths and the confirmation guard.

use crate::common::{TestProject, TestRemote, TestRepo, grove_cmd, stderr, stdout};

#[test]
fn test_init_prints_worktree_path() {
    let repo = TestRepo::new();
    let output = grove_cmd(repo.root()).arg("init").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), repo.root().join("main").to_str().unwrap());
    assert!(stderr(&output).contains("Converted"));
}

#[test]
fn test_checkout_create_prints_path_and_warns_without_tool() {
    let project = TestProject::new();
    let output = grove_cmd(project.main())
        .args(["checkout", "--create", "feature/login"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let expected = project.root().join("feature-login");
    assert_eq!(stdout(&output).trim(), expected.to_str().unwrap());
    assert!(stderr(&output).contains("mise is not installed"));
    assert!(expected.is_dir());
}

#[test]
fn test_switch_alias_with_directory_flag() {
    let project = TestProject::new();
    project.add_worktree("bugfix", "bugfix");
    let base = project.base().to_path_buf();

    let output = grove_cmd(&base)
        .arg("-C")
        .arg(project.root())
        .args(["switch", "bugf"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        project.root().join("bugfix").to_str().unwrap()
    );
}

#[test]
fn test_list_marks_current_and_head() {
    let project = TestProject::new();
    let topic = project.add_worktree("topic", "topic");

    let output = grove_cmd(&topic).arg("list").output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    let main_line = lines.iter().find(|l| l.contains(" main ")).unwrap();
    let topic_line = lines.iter().find(|l| l.contains(" topic ")).unwrap();
    assert!(main_line.starts_with(" ^"));
    assert!(topic_line.starts_with("@ "));
}

#[test]
fn test_remove_without_tty_requires_yes() {
    let project = TestProject::new();
    let topic = project.add_worktree("topic", "topic");

    let output = grove_cmd(project.main())
        .args(["rm", "topic"])
        .stdin(std::process::Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("non-interactive"));
    assert!(topic.exists());
}

#[test]
fn test_remove_from_inside_prints_relocation() {
    let project = TestProject::new();
    let topic = project.add_worktree("topic", "topic");

    let output = grove_cmd(&topic)
        .args(["rm", "topic", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), project.main().to_str().unwrap());
    assert!(!topic.exists());
}

#[test]
fn test_sync_from_inside_pruned_worktree_prints_relocation() {
    let remote = TestRemote::new(&["gone"]);
    let root = remote.clone_project();
    let checkout = grove_cmd(&root).args(["checkout", "gone"]).output().unwrap();
    assert!(checkout.status.success(), "{}", stderr(&checkout));
    let gone = root.join("gone");

    remote.delete_branch("gone");
    let output = grove_cmd(&gone).arg("sync").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), root.join("main").to_str().unwrap());
    assert!(stderr(&output).contains("Removed 1 worktree"));
    assert!(!gone.exists());
}

#[test]
fn test_remove_head_is_refused() {
    let project = TestProject::new();
    let output = grove_cmd(project.root())
        .args(["rm", "main", "-y"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Refusing to remove the head worktree"));
    assert!(project.main().exists());
}

#[test]
fn test_config_set_and_show() {
    let project = TestProject::new();
    let set = grove_cmd(project.main())
        .args(["config", "set", "setup-task", "bootstrap"])
        .output()
        .unwrap();
    assert!(set.status.success(), "{}", stderr(&set));
    let set = grove_cmd(project.main())
        .args(["config", "set", "trust", "false"])
        .output()
        .unwrap();
    assert!(set.status.success(), "{}", stderr(&set));

    let show = grove_cmd(project.main())
        .args(["config", "show"])
        .output()
        .unwrap();
    let out = stdout(&show);
    assert!(out.contains("grove.trust = false"), "{out}");
    assert!(out.contains("grove.setupTask = bootstrap"), "{out}");
    assert!(out.contains("hook tool: (not found)"), "{out}");
}

#[test]
fn test_outside_project_exits_nonzero() {
    let repo = TestRepo::new();
    let output = grove_cmd(repo.base()).arg("list").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Not inside a grove project"));
    assert!(stdout(&output).is_empty());
}
