mod checkout;
mod clone;
mod config;
mod init;
mod list;
mod remove;
mod sync;

use std::path::Path;

pub(crate) use checkout::handle_checkout;
pub(crate) use clone::handle_clone;
pub(crate) use config::{handle_config_set_setup_task, handle_config_set_trust, handle_config_show};
pub(crate) use init::handle_init;
pub(crate) use list::handle_list;
pub(crate) use remove::handle_remove;
pub(crate) use sync::handle_sync;

/// Print a directory for the shell wrapper to `cd` into.
///
/// The only thing grove writes to stdout besides `list` and `config show`.
fn print_path(path: &Path) {
    grove::styling::println!("{}", path.display());
}
