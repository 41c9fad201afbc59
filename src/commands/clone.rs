use std::path::Path;

use color_print::cformat;
use grove::git::GitError;
use grove::path::{dir_name_from_url, format_path_for_display};
use grove::project::clone;
use grove::styling::{eprintln, progress_message, success_message};

use super::print_path;

pub(crate) fn handle_clone(url: &str, directory: Option<&Path>, cwd: &Path) -> anyhow::Result<()> {
    let dest = match directory {
        Some(dir) => cwd.join(dir),
        None => {
            let name = dir_name_from_url(url).ok_or_else(|| GitError::Other {
                message: format!("Cannot derive a directory name from {url}; pass one explicitly"),
            })?;
            cwd.join(name)
        }
    };

    eprintln!(
        "{}",
        progress_message(cformat!(
            "Cloning <bold>{url}</> into {}...",
            format_path_for_display(&dest)
        ))
    );
    let outcome = clone::clone(url, &dest)?;
    eprintln!(
        "{}",
        success_message(cformat!(
            "Cloned; <bold>{}</> is at {}",
            outcome.branch,
            format_path_for_display(&outcome.worktree)
        ))
    );

    print_path(&outcome.worktree);
    Ok(())
}
