//! ast-grep wrapper for Go sources.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Parse Go source code into an ast-grep tree.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Go.ast_grep(source)
}

/// A syntax error found in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// One-based line.
    pub line: usize,
    pub snippet: String,
}

/// First `ERROR` or `MISSING` node of the tree, in source order.
///
/// tree-sitter recovers from truncated input by inserting zero-width
/// `MISSING` tokens (an unclosed `{` gets a missing `}`), so both kinds
/// mark malformed source.
#[must_use]
pub fn first_syntax_error(tree: &AstTree) -> Option<SyntaxError> {
    find_error(&tree.root())
}

fn find_error<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<SyntaxError> {
    if node.is_missing() {
        return Some(SyntaxError {
            line: node.start_pos().line() + 1,
            snippet: format!("missing {}", node.kind()),
        });
    }
    if node.kind().as_ref() == "ERROR" {
        let text = node.text();
        let snippet = text.lines().next().unwrap_or_default().trim();
        return Some(SyntaxError {
            line: node.start_pos().line() + 1,
            snippet: snippet.chars().take(60).collect(),
        });
    }
    node.children().find_map(|child| find_error(&child))
}

/// Call `visit` on `node` and every descendant, in source order.
pub fn walk<D: ast_grep_core::Doc>(node: &Node<D>, visit: &mut impl FnMut(&Node<D>)) {
    visit(node);
    for child in node.children() {
        walk(&child, visit);
    }
}
