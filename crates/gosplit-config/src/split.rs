//! Splitting behavior.

use gosplit_core::enums::MethodStrategy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Comment-to-declaration proximity bound, about 50 lines of 80 columns.
const fn default_max_comment_gap() -> usize {
    4000
}

fn default_collision_prefix() -> String {
    "splitted_".to_string()
}

fn default_common_file_stem() -> String {
    "common".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_file_mode() -> u32 {
    0o600
}

const fn default_dir_mode() -> u32 {
    0o755
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitConfig {
    /// Largest byte gap between a standalone comment and the declaration it
    /// is attributed to.
    #[serde(default = "default_max_comment_gap")]
    pub max_comment_gap: usize,

    /// Prefix for an output file whose derived name equals its input's name.
    #[serde(default = "default_collision_prefix")]
    pub collision_prefix: String,

    /// File stem that receives public const/var/type groups.
    #[serde(default = "default_common_file_stem")]
    pub common_file_stem: String,

    #[serde(default)]
    pub method_strategy: MethodStrategy,

    /// Extract public methods in a public split.
    #[serde(default = "default_true")]
    pub extract_methods: bool,

    /// Move tests of extracted functions out of `<base>_test.go`.
    #[serde(default = "default_true")]
    pub split_companion_tests: bool,

    /// Replace output files that already exist instead of failing.
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Plan and report only.
    #[serde(default)]
    pub dry_run: bool,

    /// Permission bits for written files (Unix only).
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Permission bits for created directories (Unix only).
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_comment_gap: default_max_comment_gap(),
            collision_prefix: default_collision_prefix(),
            common_file_stem: default_common_file_stem(),
            method_strategy: MethodStrategy::default(),
            extract_methods: true,
            split_companion_tests: true,
            overwrite_existing: false,
            dry_run: false,
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
        }
    }
}

impl SplitConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_comment_gap == 0 {
            return Err(ConfigError::invalid("split.max_comment_gap", "must be greater than zero"));
        }
        if self.collision_prefix.is_empty() {
            return Err(ConfigError::invalid("split.collision_prefix", "must not be empty"));
        }
        if self.common_file_stem.is_empty() || self.common_file_stem.contains('/') {
            return Err(ConfigError::invalid(
                "split.common_file_stem",
                "must be a non-empty file stem without path separators",
            ));
        }
        if self.file_mode > 0o777 || self.dir_mode > 0o777 {
            return Err(ConfigError::invalid("split.file_mode", "permission bits must fit in 0o777"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = SplitConfig::default();
        assert_eq!(config.max_comment_gap, 4000);
        assert_eq!(config.collision_prefix, "splitted_");
        assert_eq!(config.common_file_stem, "common");
        assert!(config.extract_methods);
        assert!(config.split_companion_tests);
        assert!(!config.overwrite_existing);
        assert_eq!(config.file_mode, 0o600);
        assert_eq!(config.dir_mode, 0o755);
    }

    #[test]
    fn zero_gap_is_rejected() {
        let config = SplitConfig {
            max_comment_gap: 0,
            ..SplitConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("split.max_comment_gap"));
    }

    #[test]
    fn common_stem_cannot_be_a_path() {
        let config = SplitConfig {
            common_file_stem: "sub/common".into(),
            ..SplitConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
