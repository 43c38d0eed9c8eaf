//! Directory walk filters.

use serde::{Deserialize, Serialize};

fn default_exclude_dirs() -> Vec<String> {
    ["vendor", "testdata", ".git", "node_modules"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WalkConfig {
    /// Directory names never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Glob patterns, relative to the walk root, of paths to skip.
    #[serde(default)]
    pub exclude_globs: Vec<String>,

    /// Honor `.gitignore` files.
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
            exclude_globs: Vec::new(),
            respect_gitignore: false,
        }
    }
}
