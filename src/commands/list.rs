use std::path::Path;

use grove::path::{format_path_for_display, is_within};
use grove::project::{Project, WorktreeEntry};
use grove::styling::{CURRENT, DIM, HEAD, StyledLine, println};
use unicode_width::UnicodeWidthStr;

const DETACHED: &str = "(detached)";

pub(crate) fn handle_list(cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    let worktrees = project.worktrees()?;
    for line in layout_rows(&worktrees, cwd) {
        println!("{}", line.render());
    }
    Ok(())
}

/// One line per worktree: markers, directory, branch, path.
///
/// `@` marks the worktree containing `cwd`, `^` the head worktree.
fn layout_rows(worktrees: &[WorktreeEntry], cwd: &Path) -> Vec<StyledLine> {
    let dir_width = worktrees
        .iter()
        .map(|wt| wt.directory_name.width())
        .max()
        .unwrap_or(0);
    let branch_width = worktrees
        .iter()
        .map(|wt| wt.branch_name.as_deref().unwrap_or(DETACHED).width())
        .max()
        .unwrap_or(0);

    worktrees
        .iter()
        .map(|wt| {
            let mut line = StyledLine::new();
            let current = is_within(cwd, &wt.path);
            if current {
                line.push_styled("@", CURRENT);
            } else {
                line.push_raw(" ");
            }
            if wt.is_head {
                line.push_styled("^", HEAD);
            }
            line.pad_to(3);

            if current {
                line.push_styled(wt.directory_name.as_str(), CURRENT);
            } else {
                line.push_raw(wt.directory_name.as_str());
            }
            line.pad_to(3 + dir_width + 2);

            match &wt.branch_name {
                Some(branch) => line.push_raw(branch.as_str()),
                None => line.push_styled(DETACHED, DIM),
            }
            line.pad_to(3 + dir_width + 2 + branch_width + 2);

            line.push_styled(format_path_for_display(&wt.path), DIM);
            line
        })
        .collect()
}
