use std::path::Path;

use color_print::cformat;
use grove::hooks::HookRunner;
use grove::path::format_path_for_display;
use grove::project::{CheckoutRequest, Project};
use grove::styling::{eprintln, success_message};

use super::print_path;

pub(crate) fn handle_checkout(name: &str, create: bool, cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    let request = CheckoutRequest {
        name: name.to_string(),
        create,
    };
    let outcome = project.checkout(&request, &HookRunner::detect(), cwd)?;

    if outcome.created {
        eprintln!(
            "{}",
            success_message(cformat!(
                "Created worktree for <bold>{name}</> at {}",
                format_path_for_display(&outcome.path)
            ))
        );
    }

    print_path(&outcome.path);
    Ok(())
}
