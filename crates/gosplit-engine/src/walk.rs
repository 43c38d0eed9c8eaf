//! Candidate file discovery.
//!
//! Uses the `ignore` crate's walker with gitignore handling off by default:
//! generated or ignored Go files are still split unless the configuration
//! asks otherwise. Excluded directory names and globs are applied through
//! `filter_entry`, so excluded trees are never descended into.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use gosplit_config::WalkConfig;
use gosplit_core::enums::SplitMode;
use gosplit_parser::{is_go_file, is_test_file};
use ignore::WalkBuilder;

use crate::error::SplitError;

/// Go files under `root` that `mode` processes, sorted by path.
///
/// # Errors
/// Returns [`SplitError::Glob`] for an invalid exclude glob and
/// [`SplitError::Walk`] if a directory cannot be read.
pub fn discover_go_files(
    root: &Path,
    mode: SplitMode,
    config: &WalkConfig,
) -> Result<Vec<PathBuf>, SplitError> {
    let globs = build_globset(&config.exclude_globs)?;
    let exclude_dirs: BTreeSet<String> = config.exclude_dirs.iter().cloned().collect();
    let base = root.to_path_buf();

    let mut builder = WalkBuilder::new(root);
    builder.hidden(false);
    if config.respect_gitignore {
        builder.require_git(false);
    } else {
        builder
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false);
    }
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if is_dir
            && entry.depth() > 0
            && exclude_dirs.contains(entry.file_name().to_string_lossy().as_ref())
        {
            return false;
        }
        let relative = entry.path().strip_prefix(&base).unwrap_or(entry.path());
        !globs.is_match(relative)
    });

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = result.map_err(|source| SplitError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let wanted = is_go_file(&name)
            && match mode {
                SplitMode::Public => !is_test_file(&name),
                SplitMode::Tests => is_test_file(&name),
            };
        if wanted {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, SplitError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn create_fixture(dir: &Path) {
        for sub in ["api", "api/v1", "vendor/lib", "testdata", ".hidden", "gen"] {
            fs::create_dir_all(dir.join(sub)).expect("mkdir");
        }
        let files = [
            "main.go",
            "main_test.go",
            "README.md",
            "api/handler.go",
            "api/handler_test.go",
            "api/v1/routes.go",
            "vendor/lib/lib.go",
            "testdata/sample.go",
            ".hidden/tool.go",
            "gen/models.go",
        ];
        for file in files {
            fs::write(dir.join(file), "package x\n").expect("write");
        }
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn public_mode_finds_non_test_files() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        create_fixture(dir.path());
        let files = discover_go_files(dir.path(), SplitMode::Public, &WalkConfig::default()).expect("walk");
        assert_eq!(
            relative(dir.path(), &files),
            vec![".hidden/tool.go", "api/handler.go", "api/v1/routes.go", "gen/models.go", "main.go"]
        );
    }

    #[test]
    fn test_mode_finds_test_files() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        create_fixture(dir.path());
        let files = discover_go_files(dir.path(), SplitMode::Tests, &WalkConfig::default()).expect("walk");
        assert_eq!(
            relative(dir.path(), &files),
            vec!["api/handler_test.go", "main_test.go"]
        );
    }

    #[test]
    fn exclude_globs_prune_paths() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        create_fixture(dir.path());
        let config = WalkConfig {
            exclude_globs: vec!["gen/**".into(), ".hidden".into()],
            ..WalkConfig::default()
        };
        let files = discover_go_files(dir.path(), SplitMode::Public, &config).expect("walk");
        assert_eq!(
            relative(dir.path(), &files),
            vec!["api/handler.go", "api/v1/routes.go", "main.go"]
        );
    }

    #[test]
    fn gitignore_is_ignored_unless_requested() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        create_fixture(dir.path());
        fs::write(dir.path().join(".gitignore"), "gen/\n").expect("write");

        let files = discover_go_files(dir.path(), SplitMode::Public, &WalkConfig::default()).expect("walk");
        assert!(relative(dir.path(), &files).contains(&"gen/models.go".to_string()));

        let config = WalkConfig {
            respect_gitignore: true,
            ..WalkConfig::default()
        };
        let files = discover_go_files(dir.path(), SplitMode::Public, &config).expect("walk");
        assert!(!relative(dir.path(), &files).contains(&"gen/models.go".to_string()));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let config = WalkConfig {
            exclude_globs: vec!["a[".into()],
            ..WalkConfig::default()
        };
        let error = discover_go_files(dir.path(), SplitMode::Public, &config).unwrap_err();
        assert!(matches!(error, SplitError::Glob(_)));
    }
}
