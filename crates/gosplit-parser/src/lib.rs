//! # gosplit-parser
//!
//! ast-grep-based Go parsing for gosplit.
//!
//! - [`parse_go`] turns source text into a [`SourceFile`]: top-level
//!   declarations with their spans, bodies, names, and referenced
//!   identifiers; comment blocks grouped the way the Go scanner groups them;
//!   doc comments bound to the declarations they precede.
//! - [`render`] assembles a new source file from slices of a parsed one and
//!   checks that the result parses.
//!
//! [`SourceFile`]: gosplit_core::entities::SourceFile

pub mod error;
pub mod go;
pub mod parser;
pub mod printer;
pub mod source_files;

pub use error::ParserError;
pub use go::parse_go;
pub use printer::{RenderFile, render};
pub use source_files::{companion_test_file, has_build_suffix, is_go_file, is_test_file};
