//! Import resolution policy.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A third-party assertion package referenced through a conventional name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssertionLibrary {
    /// Substring of the import path, e.g. `testify/assert`.
    pub path_fragment: String,
    /// Name the package is used through, e.g. `assert`.
    pub short_name: String,
}

impl AssertionLibrary {
    fn new(path_fragment: &str, short_name: &str) -> Self {
        Self {
            path_fragment: path_fragment.to_string(),
            short_name: short_name.to_string(),
        }
    }
}

fn default_always_required() -> String {
    "testing".to_string()
}

fn default_test_prefixes() -> Vec<String> {
    ["Test", "Benchmark", "Example", "Fuzz"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_assertion_libraries() -> Vec<AssertionLibrary> {
    vec![
        AssertionLibrary::new("testify/assert", "assert"),
        AssertionLibrary::new("testify/require", "require"),
        AssertionLibrary::new("testify/suite", "suite"),
        AssertionLibrary::new("testify/mock", "mock"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Import kept for any group containing a test-style function.
    #[serde(default = "default_always_required")]
    pub always_required: String,

    /// Name prefixes that make a receiver-less function test-style.
    #[serde(default = "default_test_prefixes")]
    pub test_prefixes: Vec<String>,

    #[serde(default = "default_assertion_libraries")]
    pub assertion_libraries: Vec<AssertionLibrary>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            always_required: default_always_required(),
            test_prefixes: default_test_prefixes(),
            assertion_libraries: default_assertion_libraries(),
        }
    }
}

impl ImportConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.test_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::invalid("imports.test_prefixes", "prefixes must not be empty"));
        }
        if let Some(lib) = self
            .assertion_libraries
            .iter()
            .find(|lib| lib.path_fragment.is_empty() || lib.short_name.is_empty())
        {
            return Err(ConfigError::invalid(
                "imports.assertion_libraries",
                format!("incomplete entry {lib:?}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_cover_testify() {
        let config = ImportConfig::default();
        let names: Vec<_> = config
            .assertion_libraries
            .iter()
            .map(|lib| lib.short_name.as_str())
            .collect();
        assert_eq!(names, vec!["assert", "require", "suite", "mock"]);
        assert_eq!(config.test_prefixes.len(), 4);
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let config = ImportConfig {
            test_prefixes: vec![String::new()],
            ..ImportConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
