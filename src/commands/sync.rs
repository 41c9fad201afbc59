use std::path::Path;

use color_print::cformat;
use grove::project::{Project, SyncOptions, SyncReport};
use grove::styling::{eprintln, error_message, info_message, warning_message};

use super::print_path;

pub(crate) fn handle_sync(dry_run: bool, cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    let report = project.sync(SyncOptions { dry_run }, cwd)?;

    if report.is_empty() {
        eprintln!("{}", info_message("No worktrees to prune"));
        return Ok(());
    }
    if report.dry_run {
        show_dry_run_output(&report);
        return Ok(());
    }

    report_results(&report);
    if let Some(path) = &report.relocate_to {
        print_path(path);
    }
    Ok(())
}

fn show_dry_run_output(report: &SyncReport) {
    eprintln!("Would remove {}:", worktrees(report.stale.len()));
    for entry in &report.stale {
        let branch = entry.branch_name.as_deref().unwrap_or_default();
        eprintln!("  {} ({branch} is gone from origin)", entry.directory_name);
    }
}

fn report_results(report: &SyncReport) {
    if report.failed.is_empty() {
        eprintln!(
            "{}",
            cformat!("<green>✓</> Removed {}", worktrees(report.removed.len()))
        );
        return;
    }

    eprintln!(
        "{}",
        warning_message(format!(
            "Removed {} of {} ({} failed)",
            report.removed.len(),
            worktrees(report.stale.len()),
            report.failed.len()
        ))
    );
    eprintln!("\nFailed removals:");
    for (entry, error) in &report.failed {
        eprintln!(
            "{}",
            error_message(format!("  {}: {error}", entry.directory_name))
        );
    }
}

fn worktrees(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} worktree{suffix}")
}
