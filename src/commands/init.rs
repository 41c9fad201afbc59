use std::path::Path;

use color_print::cformat;
use grove::path::format_path_for_display;
use grove::project::init;
use grove::styling::{eprintln, info_message, success_message};

use super::print_path;

pub(crate) fn handle_init(cwd: &Path) -> anyhow::Result<()> {
    let outcome = init::convert(cwd)?;

    let worktree = format_path_for_display(&outcome.worktree);
    if outcome.repaired {
        eprintln!(
            "{}",
            info_message(cformat!(
                "Already a project; checked <bold>{}</> at {worktree}",
                outcome.branch
            ))
        );
    } else {
        eprintln!(
            "{}",
            success_message(cformat!(
                "Converted to a project; <bold>{}</> is now at {worktree}",
                outcome.branch
            ))
        );
    }

    print_path(&outcome.worktree);
    Ok(())
}
