use std::path::Path;

use color_print::cformat;
use grove::config::{SETUP_TASK_KEY, Settings, TRUST_KEY};
use grove::hooks::HookRunner;
use grove::path::format_path_for_display;
use grove::project::Project;
use grove::styling::{eprintln, println, success_message};

pub(crate) fn handle_config_show(cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    let settings = Settings::load(project.repo())?;

    println!("{TRUST_KEY} = {}", settings.trust);
    match &settings.setup_task {
        Some(task) => println!("{SETUP_TASK_KEY} = {task}"),
        None => println!("{}", cformat!("{SETUP_TASK_KEY} = <dim>(disabled)</>")),
    }
    match HookRunner::detect().tool() {
        Some(tool) => println!("hook tool: {}", format_path_for_display(tool)),
        None => println!("{}", cformat!("hook tool: <dim>(not found)</>")),
    }
    Ok(())
}

pub(crate) fn handle_config_set_trust(value: bool, cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    Settings::set_trust(project.repo(), value)?;
    eprintln!("{}", success_message(cformat!("Set <bold>{TRUST_KEY}</> to {value}")));
    Ok(())
}

pub(crate) fn handle_config_set_setup_task(name: &str, cwd: &Path) -> anyhow::Result<()> {
    let project = Project::discover(cwd)?;
    Settings::set_setup_task(project.repo(), name)?;
    let message = if name.trim().is_empty() {
        cformat!("Disabled the setup task (<bold>{SETUP_TASK_KEY}</> is empty)")
    } else {
        cformat!("Set <bold>{SETUP_TASK_KEY}</> to {name}")
    };
    eprintln!("{}", success_message(message));
    Ok(())
}
