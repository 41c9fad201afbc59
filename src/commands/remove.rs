use std::io::{self, IsTerminal, Write};
use std::path::Path;

use color_print::cformat;
use grove::git::GitError;
use grove::hooks::HookRunner;
use grove::path::format_path_for_display;
use grove::project::{Project, RemoveOptions, WorktreeEntry};
use grove::styling::{eprint, eprintln, prompt_message, stderr, success_message};

use super::print_path;

pub(crate) fn handle_remove(name: &str, force: bool, yes: bool, cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    let options = RemoveOptions {
        name: name.to_string(),
        force,
        yes,
    };
    let outcome = project.remove(&options, &HookRunner::detect(), cwd, confirm_removal)?;

    let removed = &outcome.removed;
    let message = match &removed.branch_name {
        Some(branch) => cformat!(
            "Removed worktree <bold>{}</> and branch <bold>{branch}</>",
            removed.directory_name
        ),
        None => cformat!("Removed worktree <bold>{}</>", removed.directory_name),
    };
    eprintln!("{}", success_message(message));

    if let Some(path) = &outcome.relocate_to {
        print_path(path);
    }
    Ok(())
}

fn confirm_removal(entry: &WorktreeEntry) -> anyhow::Result<bool> {
    if !io::stdin().is_terminal() {
        return Err(GitError::NotInteractive.into());
    }

    let branch = entry.branch_name.as_deref().unwrap_or("(detached)");
    eprint!(
        "{} ",
        prompt_message(cformat!(
            "Remove <bold>{}</> ({branch}) at {}? <bold>[y/N]</>",
            entry.directory_name,
            format_path_for_display(&entry.path)
        ))
    );
    stderr().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    eprintln!(); // End the prompt line

    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
