//! Comment ownership.
//!
//! Every comment block relates to a declaration in one of four ways: it is
//! the declaration's doc comment (bound by the parser), it sits inside the
//! declaration's body (inline), it floats above the declaration and is
//! closer to it than to anything else (standalone-owned), or it is unowned.
//! Only owned comments move with an extracted declaration.

use gosplit_core::entities::{CommentBlock, Declaration, SourceFile};
use gosplit_core::ids::{CommentId, DeclId};

/// Positional rules for standalone comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributionPolicy {
    /// Largest byte distance between a standalone comment's end and the
    /// declaration it is attributed to.
    pub max_gap: usize,
}

impl AttributionPolicy {
    #[must_use]
    pub const fn new(max_gap: usize) -> Self {
        Self { max_gap }
    }
}

/// Comments owned by one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedComments {
    pub doc: Option<CommentId>,
    /// Free-floating blocks above the declaration, in source order.
    pub standalone: Vec<CommentId>,
    /// Blocks inside the declaration's body, in source order.
    pub inline: Vec<CommentId>,
}

impl OwnedComments {
    pub fn iter(&self) -> impl Iterator<Item = CommentId> + '_ {
        self.doc
            .into_iter()
            .chain(self.standalone.iter().copied())
            .chain(self.inline.iter().copied())
    }
}

/// Decide whether the standalone `comment` belongs to `decl`.
///
/// Doc comments must be filtered out by the caller; this only looks at
/// positions. Comments at or after the start of `decl` never belong to it,
/// and neither does anything before the end of the `package` clause.
#[must_use]
pub fn attributes(
    file: &SourceFile,
    comment: &CommentBlock,
    decl: &Declaration,
    policy: AttributionPolicy,
) -> bool {
    if comment.span.start < file.package_clause.end {
        return false;
    }
    if decl.body.is_some_and(|body| body.contains(comment.span)) {
        return false;
    }
    if file
        .declarations
        .iter()
        .any(|other| other.id != decl.id && other.span.contains(comment.span))
    {
        return false;
    }
    let Some(index) = file.declarations.iter().position(|d| d.id == decl.id) else {
        return false;
    };
    if comment.span.end >= decl.span.start {
        return false;
    }

    let to_next = decl.span.start - comment.span.end;
    let Some(previous) = index.checked_sub(1).map(|i| &file.declarations[i]) else {
        return to_next < policy.max_gap;
    };
    let previous_end = previous.closing_offset();
    if comment.span.start.saturating_sub(previous_end) < to_next {
        return false;
    }
    comment.span.start > previous_end && to_next < policy.max_gap
}

/// Doc, standalone, and inline comments of `id`.
///
/// `docs` is the set of every doc comment in the file; those are never
/// standalone candidates.
#[must_use]
pub fn owned_comments(
    file: &SourceFile,
    id: DeclId,
    docs: &std::collections::BTreeSet<CommentId>,
    policy: AttributionPolicy,
) -> OwnedComments {
    let decl = file.declaration(id);
    let interior = decl.interior();
    let mut owned = OwnedComments {
        doc: decl.doc,
        ..OwnedComments::default()
    };
    for comment in &file.comments {
        if docs.contains(&comment.id) {
            continue;
        }
        if interior.contains(comment.span) {
            owned.inline.push(comment.id);
        } else if attributes(file, comment, decl, policy) {
            owned.standalone.push(comment.id);
        }
    }
    owned
}
