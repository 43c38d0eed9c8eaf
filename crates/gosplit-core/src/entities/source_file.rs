use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CommentBlock, Declaration, ImportSpec, Span};
use crate::ids::{CommentId, DeclId, ImportId};

/// A parsed Go source file.
///
/// Declarations, comments, and imports are arenas indexed by their handles and
/// kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub package: String,
    pub package_clause: Span,
    pub declarations: Vec<Declaration>,
    pub comments: Vec<CommentBlock>,
    pub imports: Vec<ImportSpec>,
    /// Comment blocks before the package clause, excluding the package doc.
    pub header: Vec<CommentId>,
    /// Doc comment of the package clause.
    pub package_doc: Option<CommentId>,
    /// The file imports `"C"`.
    pub uses_cgo: bool,
    pub source: String,
}

impl SourceFile {
    #[must_use]
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    #[must_use]
    pub fn comment(&self, id: CommentId) -> &CommentBlock {
        &self.comments[id.index()]
    }

    #[must_use]
    pub fn import(&self, id: ImportId) -> &ImportSpec {
        &self.imports[id.index()]
    }

    /// Source text of `span`. Out-of-range spans yield an empty string.
    #[must_use]
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    /// Declarations other than `import` declarations, in source order.
    pub fn code_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|decl| !decl.is_import())
    }

    /// Comment blocks bound as some declaration's doc comment.
    #[must_use]
    pub fn doc_comments(&self) -> BTreeSet<CommentId> {
        self.declarations.iter().filter_map(|decl| decl.doc).collect()
    }

    /// The declaration whose span encloses `span`, if any.
    #[must_use]
    pub fn enclosing_declaration(&self, span: Span) -> Option<DeclId> {
        self.declarations
            .iter()
            .find(|decl| decl.span.contains(span))
            .map(|decl| decl.id)
    }

    /// Comment blocks in the file header and the package doc.
    #[must_use]
    pub fn header_comments(&self) -> BTreeSet<CommentId> {
        self.header.iter().copied().chain(self.package_doc).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DeclKind, FunctionDecl};
    use pretty_assertions::assert_eq;

    fn sample() -> SourceFile {
        let source = "package demo\n\n// Run runs.\nfunc Run() {}\n".to_string();
        SourceFile {
            package: "demo".into(),
            package_clause: Span::new(0, 12),
            declarations: vec![Declaration {
                id: DeclId::new(0),
                kind: DeclKind::Function(FunctionDecl {
                    name: "Run".into(),
                    receiver: None,
                }),
                span: Span::new(27, 40),
                start_line: 3,
                end_line: 3,
                body: Some(Span::new(38, 40)),
                doc: Some(CommentId::new(0)),
                references: BTreeSet::new(),
            }],
            comments: vec![CommentBlock {
                id: CommentId::new(0),
                span: Span::new(14, 26),
                start_line: 2,
                end_line: 2,
                text: "// Run runs.".into(),
                starts_line: true,
            }],
            imports: Vec::new(),
            header: Vec::new(),
            package_doc: None,
            uses_cgo: false,
            source,
        }
    }

    #[test]
    fn text_slices_source() {
        let file = sample();
        assert_eq!(file.text(Span::new(27, 40)), "func Run() {}");
        assert_eq!(file.text(file.comment(CommentId::new(0)).span), "// Run runs.");
        assert_eq!(file.text(Span::new(500, 600)), "");
    }

    #[test]
    fn doc_comments_collects_bound_docs() {
        let file = sample();
        assert_eq!(file.doc_comments(), BTreeSet::from([CommentId::new(0)]));
    }

    #[test]
    fn enclosing_declaration_by_span() {
        let file = sample();
        assert_eq!(file.enclosing_declaration(Span::new(38, 40)), Some(DeclId::new(0)));
        assert_eq!(file.enclosing_declaration(Span::new(14, 26)), None);
    }
}
