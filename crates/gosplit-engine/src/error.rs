//! Split error types for gosplit-engine.

use std::path::{Path, PathBuf};

use gosplit_core::errors::CoreError;
use gosplit_parser::ParserError;

/// Errors from splitting a file or walking a directory.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The input file is not valid Go.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    /// A rendered output does not parse back.
    #[error("failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    /// Reading, writing, or deleting a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A derived output path already exists.
    #[error("output file already exists: {}", path.display())]
    Conflict { path: PathBuf },

    /// A path without a UTF-8 file name was handed to the splitter.
    #[error("not a Go source file: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// Walking the input directory failed.
    #[error("walk error under {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// An exclude glob from the configuration does not compile.
    #[error("invalid exclude glob: {0}")]
    Glob(#[from] globset::Error),

    /// A logic defect: broken partition or state machine.
    #[error("internal error: {0}")]
    Invariant(#[from] CoreError),
}

impl SplitError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
