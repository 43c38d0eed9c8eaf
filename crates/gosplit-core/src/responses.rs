//! Report types returned by the orchestrator and printed by `gosplit`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::enums::{FileState, SplitMode};

/// Result of splitting one directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitReport {
    pub root: PathBuf,
    pub mode: SplitMode,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub state: FileState,
    pub created: Vec<CreatedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    /// The `_test.go` companion split alongside this file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion: Option<Box<FileReport>>,
}

/// One output file written (or planned, in a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFile {
    pub path: PathBuf,
    /// Labels of the declarations moved into the file.
    pub declarations: Vec<String>,
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub files_processed: usize,
    pub files_created: usize,
    pub files_rewritten: usize,
    pub files_deleted: usize,
    pub files_untouched: usize,
}

impl FileReport {
    #[must_use]
    pub const fn new(path: PathBuf, state: FileState) -> Self {
        Self {
            path,
            state,
            created: Vec::new(),
            skipped_reason: None,
            companion: None,
        }
    }

    /// This report followed by its companion report, if any.
    pub fn with_companion(&self) -> impl Iterator<Item = &Self> {
        std::iter::once(self).chain(self.companion.as_deref())
    }
}

impl SplitReport {
    #[must_use]
    pub const fn new(root: PathBuf, mode: SplitMode, dry_run: bool) -> Self {
        Self {
            root,
            mode,
            dry_run,
            files: Vec::new(),
        }
    }

    #[must_use]
    pub fn totals(&self) -> ReportTotals {
        let mut totals = ReportTotals::default();
        for report in self.files.iter().flat_map(FileReport::with_companion) {
            totals.files_processed += 1;
            totals.files_created += report.created.len();
            match report.state {
                FileState::Rewritten => totals.files_rewritten += 1,
                FileState::Deleted => totals.files_deleted += 1,
                FileState::Untouched | FileState::Skipped => totals.files_untouched += 1,
                FileState::Parsed | FileState::Extracted => {}
            }
        }
        totals
    }
}
