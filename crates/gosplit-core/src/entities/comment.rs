use serde::{Deserialize, Serialize};

use super::Span;
use crate::ids::CommentId;

/// A run of consecutive comments, grouped the way the Go scanner groups them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    pub id: CommentId,
    pub span: Span,
    /// Zero-based line of the first comment.
    pub start_line: usize,
    /// Zero-based line on which the last comment ends.
    pub end_line: usize,
    /// Verbatim source text, including any newlines between the comments.
    pub text: String,
    /// False when the first comment trails code on its line.
    pub starts_line: bool,
}

impl CommentBlock {
    /// Whether the block is a `//go:build` or `// +build` constraint.
    #[must_use]
    pub fn is_build_constraint(&self) -> bool {
        self.text.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with("//go:build") || line.starts_with("// +build")
        })
    }
}
