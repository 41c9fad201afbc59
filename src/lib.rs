//! Branch-per-directory git worktree layouts.
//!
//! A project root holds the shared store in `.store`, a `.git` pointer file
//! so plain git commands work at the root, and one directory per worktree
//! named after its branch. See [`project`] for the lifecycle operations.

pub mod config;
pub mod fuzzy;
pub mod git;
pub mod hooks;
pub mod path;
pub mod project;
pub mod shell_exec;
pub mod styling;
