//! Comment grouping and doc binding.
//!
//! Mirrors the Go scanner: consecutive comments separated only by whitespace
//! form a block when each starts at most one line below the previous one's
//! end. A block whose first comment trails code only takes comments on that
//! same line.

use ast_grep_core::Node;
use gosplit_core::entities::{CommentBlock, Span};
use gosplit_core::ids::CommentId;

use crate::parser::walk;

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RawComment {
    pub span: Span,
    pub start_line: usize,
    pub end_line: usize,
    pub starts_line: bool,
}

/// All comment nodes under `root`, in source order.
pub(super) fn collect<D: ast_grep_core::Doc>(root: &Node<D>, source: &str) -> Vec<RawComment> {
    let mut raw = Vec::new();
    walk(root, &mut |node| {
        if node.kind().as_ref() != "comment" {
            return;
        }
        let span = Span::from(node.range());
        raw.push(RawComment {
            span,
            start_line: node.start_pos().line(),
            end_line: node.end_pos().line(),
            starts_line: starts_line(source, span.start),
        });
    });
    raw.sort_by_key(|c| c.span.start);
    raw
}

/// Whether only whitespace precedes `offset` on its line.
fn starts_line(source: &str, offset: usize) -> bool {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..offset].trim().is_empty()
}

/// Group raw comments into blocks and assign their handles.
pub(super) fn group(raw: &[RawComment], source: &str) -> Vec<CommentBlock> {
    let mut runs: Vec<(RawComment, RawComment)> = Vec::new();
    for comment in raw {
        if let Some((first, last)) = runs.last_mut() {
            let gap = &source[last.span.end..comment.span.start];
            let reach = last.end_line + usize::from(first.starts_line);
            if gap.trim().is_empty() && comment.start_line <= reach {
                *last = *comment;
                continue;
            }
        }
        runs.push((*comment, *comment));
    }

    runs.into_iter()
        .enumerate()
        .map(|(index, (first, last))| {
            let span = Span::new(first.span.start, last.span.end);
            CommentBlock {
                id: CommentId::new(index),
                span,
                start_line: first.start_line,
                end_line: last.end_line,
                text: source[span.start..span.end].to_string(),
                starts_line: first.starts_line,
            }
        })
        .collect()
}

/// The doc comment of a construct starting at `start` on line `start_line`:
/// the nearest preceding block, if it begins its own line, ends on the line
/// directly above, and is separated from the construct by whitespace only.
pub(super) fn bind_doc(
    blocks: &[CommentBlock],
    source: &str,
    start_line: usize,
    start: usize,
) -> Option<CommentId> {
    let block = blocks.iter().rev().find(|b| b.span.end <= start)?;
    let adjacent = block.end_line + 1 == start_line;
    let clean_gap = source[block.span.end..start].trim().is_empty();
    (block.starts_line && adjacent && clean_gap).then_some(block.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn blocks(source: &str) -> Vec<CommentBlock> {
        let tree = parse_source(source);
        group(&collect(&tree.root(), source), source)
    }

    fn texts(source: &str) -> Vec<String> {
        blocks(source).into_iter().map(|b| b.text).collect()
    }

    #[test]
    fn adjacent_line_comments_form_one_block() {
        let src = "package p\n\n// one\n// two\n\n// three\nfunc F() {}\n";
        assert_eq!(texts(src), vec!["// one\n// two", "// three"]);
    }

    #[test]
    fn trailing_comment_does_not_absorb_next_line() {
        let src = "package p\n\nvar x = 1 // trailing\n// lead\nfunc F() {}\n";
        let found = blocks(src);
        assert_eq!(found.len(), 2);
        assert!(!found[0].starts_line);
        assert!(found[1].starts_line);
        assert_eq!(found[1].text, "// lead");
    }

    #[test]
    fn block_comments_spanning_lines() {
        let src = "package p\n\n/*\n header\n*/\n// next\nfunc F() {}\n";
        let found = blocks(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_line, 2);
        assert_eq!(found[0].end_line, 5);
    }

    #[test]
    fn code_between_comments_splits_blocks() {
        let src = "package p\n\nfunc F() {\n\t// a\n\tx := 1\n\t// b\n\t_ = x\n}\n";
        assert_eq!(texts(src), vec!["// a", "// b"]);
    }

    #[test]
    fn doc_requires_adjacent_line() {
        let src = "package p\n\n// Detached.\n\nfunc F() {}\n\n// Attached.\nfunc G() {}\n";
        let found = blocks(src);
        let f_start = src.find("func F").unwrap();
        let g_start = src.find("func G").unwrap();
        assert_eq!(bind_doc(&found, src, 4, f_start), None);
        assert_eq!(bind_doc(&found, src, 7, g_start), Some(found[1].id));
    }

    #[test]
    fn trailing_comment_is_not_doc() {
        let src = "package p\n\nvar x = 1 // about x\nfunc F() {}\n";
        let found = blocks(src);
        let start = src.find("func F").unwrap();
        assert_eq!(bind_doc(&found, src, 3, start), None);
    }
}
