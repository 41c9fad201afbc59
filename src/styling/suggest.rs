//! Command suggestion helpers for hint messages.
//!
//! Build copy-pasteable commands for user suggestions:
//!
//! ```
//! use grove::styling::suggest_command;
//!
//! let cmd = suggest_command("checkout", &["login"], &["--create"]);
//! assert_eq!(cmd, "grove checkout --create login");
//!
//! // Branch starting with dash gets -- separator; flags stay before --
//! let cmd = suggest_command("rm", &["-bugfix"], &["--force"]);
//! assert_eq!(cmd, "grove rm --force -- -bugfix");
//! ```

use shell_escape::escape;
use std::borrow::Cow;

/// Build a suggested command string for hints.
///
/// Flags go before positional args; arguments containing spaces, quotes, or
/// special shell characters are escaped using POSIX single-quote style. If any
/// positional argument starts with `-`, a `--` separator is inserted before it.
pub fn suggest_command(subcommand: &str, args: &[&str], flags: &[&str]) -> String {
    let mut parts = vec!["grove".to_string(), subcommand.to_string()];
    parts.extend(flags.iter().map(|s| s.to_string()));

    let mut separator_inserted = false;
    for arg in args {
        if arg.starts_with('-') && !separator_inserted {
            parts.push("--".to_string());
            separator_inserted = true;
        }
        parts.push(escape(Cow::Borrowed(*arg)).into_owned());
    }

    parts.join(" ")
}
