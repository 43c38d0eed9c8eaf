//! # gosplit-engine
//!
//! The splitting engine: decides which comments belong to which
//! declarations, partitions a file's declarations into new files and a
//! remaining file, resolves the imports each of them needs, and writes the
//! result.
//!
//! Layers, leaf first:
//! - [`naming`]: declaration names to file stems.
//! - [`attribution`]: comment ownership.
//! - [`extract`]: declaration selection per extraction mode.
//! - [`imports`]: import usage resolution.
//! - [`plan`]: the pure partition of a file into output units.
//! - [`companion`]: matching `_test.go` tests to extracted functions.
//! - [`orchestrator`]: the per-file state machine and filesystem effects.
//! - [`walk`]: candidate file discovery.

pub mod attribution;
pub mod companion;
pub mod error;
pub mod extract;
pub mod imports;
pub mod naming;
pub mod orchestrator;
pub mod plan;
pub mod walk;

pub use error::SplitError;
pub use orchestrator::{SplitProgress, Splitter};
pub use walk::discover_go_files;
