//! Path and naming helpers.
//!
//! Pure functions over names and the directory layout of a project:
//!
//! ```text
//! <root>/
//!   .store/            shared repository store
//!   .git               pointer file: "gitdir: ./.store"
//!   main/              one directory per worktree,
//!   feature-login/     named after sanitize(branch)
//! ```

use std::path::{Path, PathBuf};

use normalize_path::NormalizePath;

/// Directory holding the shared store. A directory is a project root iff it
/// directly contains this directory.
pub const STORE_DIR: &str = ".store";

/// Name of the plain repository metadata directory, and of the pointer file
/// that replaces it at a project root.
pub const GIT_DIR: &str = ".git";

/// Exact content of the pointer file at a project root.
pub const POINTER_CONTENT: &str = "gitdir: ./.store\n";

/// Characters in a branch name that would create nested directories.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Turn a branch name into a worktree directory name.
///
/// Every path separator becomes `-`. Idempotent, and the result never contains
/// a separator.
pub fn sanitize_branch(branch: &str) -> String {
    branch.replace(PATH_SEPARATORS, "-")
}

/// Derive a default checkout directory name from a remote URL.
///
/// Handles `https://host/org/repo.git`, `git@host:org/repo.git`,
/// `ssh://git@host/org/repo` and local paths. Returns `None` when no usable
/// name remains.
pub fn dir_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// Walk upward from `start` to the first directory that directly contains
/// the shared store.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(STORE_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Names of the worktree directories directly under `root`.
///
/// A worktree directory is a non-hidden subdirectory containing a `.git`
/// file. Sorted, so that candidate order is stable across calls.
pub fn worktree_dir_names(root: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(root)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().join(GIT_DIR).is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

/// Whether `path` is `dir` or lies underneath it.
///
/// Both sides are canonicalized when they exist, and lexically normalized
/// otherwise, so symlinked temp dirs (macOS `/var` -> `/private/var`) compare
/// equal.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    let resolve = |p: &Path| canonicalize(p).unwrap_or_else(|_| p.normalize());
    resolve(path).starts_with(resolve(dir))
}

/// Canonicalize a path without Windows verbatim prefix (`\\?\`).
///
/// On Windows, `std::fs::canonicalize()` returns verbatim paths like `\\?\C:\...`
/// which external tools like git cannot handle. The `dunce` crate strips this
/// prefix when safe. On Unix, this is equivalent to `std::fs::canonicalize()`.
pub fn canonicalize(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir()
}

/// Format a filesystem path for user-facing output.
///
/// Replaces home directory prefix with `~` (e.g., `/Users/alex/projects/app` -> `~/projects/app`).
/// Paths outside home are returned unchanged.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let mut display_path = PathBuf::from("~");
        display_path.push(stripped);
        return display_path.display().to_string();
    }

    path.display().to_string()
}
