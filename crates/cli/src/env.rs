// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables and well-known paths.

use std::path::{Path, PathBuf};

/// Log filter, e.g. `GHR_LOG=ghr_stack=debug`.
pub const LOG_ENV: &str = "GHR_LOG";

/// Overrides the user defaults file location.
pub const USER_CONTEXT_ENV: &str = "GHR_USER_CONTEXT";

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Project context files, in lookup order.
pub const PROJECT_FILES: &[&str] = &["ghr.json", "ghr.toml", "ghr.hcl", "cdk.json"];

/// `$GHR_USER_CONTEXT`, else `~/.ghr.json`.
pub fn user_context_path() -> Option<PathBuf> {
    match std::env::var_os(USER_CONTEXT_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::home_dir().map(|home| home.join(".ghr.json")),
    }
}

/// First project context file present in `project`, else `ghr.json` there.
pub fn project_context_path(project: &Path) -> PathBuf {
    PROJECT_FILES
        .iter()
        .map(|name| project.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| project.join(PROJECT_FILES[0]))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
