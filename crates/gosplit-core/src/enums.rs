//! Split modes, method strategies, and the per-file state machine.
//!
//! All enums serialize in kebab-case, matching their CLI spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SplitMode
// ---------------------------------------------------------------------------

/// Which files are processed and what is extracted from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Public functions, methods, and const/var/type groups of non-test files.
    #[default]
    Public,
    /// Test functions of `_test.go` files.
    Tests,
}

impl SplitMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Tests => "tests",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MethodStrategy
// ---------------------------------------------------------------------------

/// Where public methods go in a public split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodStrategy {
    /// One file per method, named `<receiver>_<method>.go`.
    #[default]
    Separate,
    /// Methods join their receiver type's declaration in `<type>.go`.
    WithStruct,
}

impl MethodStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Separate => "separate",
            Self::WithStruct => "with-struct",
        }
    }
}

impl fmt::Display for MethodStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileState
// ---------------------------------------------------------------------------

/// Processing state of one input file.
///
/// ```text
/// parsed → extracted → rewritten → deleted
///                    → deleted
///        → untouched
///        → skipped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileState {
    Parsed,
    Extracted,
    Rewritten,
    Deleted,
    /// Nothing was selected; the file was not touched.
    Untouched,
    /// The file was not eligible for splitting.
    Skipped,
}

impl FileState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Parsed => &[Self::Extracted, Self::Untouched, Self::Skipped],
            Self::Extracted => &[Self::Rewritten, Self::Deleted],
            Self::Rewritten => &[Self::Deleted],
            Self::Deleted | Self::Untouched | Self::Skipped => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Extracted => "extracted",
            Self::Rewritten => "rewritten",
            Self::Deleted => "deleted",
            Self::Untouched => "untouched",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
