//! Source rendering from slices of a parsed file.
//!
//! Output layout:
//!
//! ```text
//! <header comment blocks>
//!
//! <package doc>
//! package name
//!
//! import (...)
//!
//! <items in original order, one blank line apart>
//! ```
//!
//! Declarations are copied verbatim with their doc comment attached, so
//! comments inside a declaration travel with it. A standalone comment that
//! shared a line with the end of the previously rendered item stays on that
//! line. Comments from inside an `import (...)` block are rendered in the
//! import block, after their spec when it is rendered too.

use gosplit_core::entities::SourceFile;
use gosplit_core::ids::{CommentId, DeclId, ImportId};

use crate::error::ParserError;
use crate::parser::{first_syntax_error, parse_source};

/// What to render out of `file`. All handles must belong to `file`.
#[derive(Debug, Clone)]
pub struct RenderFile<'a> {
    pub file: &'a SourceFile,
    /// Comment blocks placed above the package clause.
    pub header: Vec<CommentId>,
    pub package_doc: Option<CommentId>,
    pub imports: Vec<ImportId>,
    /// Comment blocks that sat inside an import declaration.
    pub import_comments: Vec<CommentId>,
    pub declarations: Vec<DeclId>,
    /// Standalone comment blocks rendered as their own items.
    pub comments: Vec<CommentId>,
}

impl<'a> RenderFile<'a> {
    /// An empty file in the same package as `file`.
    #[must_use]
    pub const fn new(file: &'a SourceFile) -> Self {
        Self {
            file,
            header: Vec::new(),
            package_doc: None,
            imports: Vec::new(),
            import_comments: Vec::new(),
            declarations: Vec::new(),
            comments: Vec::new(),
        }
    }
}

enum Item {
    Decl(DeclId),
    Comment(CommentId),
}

enum ImportLine {
    Spec(ImportId),
    Comment(CommentId),
}

/// Render `spec` to Go source and verify that it parses.
///
/// # Errors
/// Returns [`ParserError::InvalidOutput`] if the rendered text does not parse.
pub fn render(spec: &RenderFile<'_>) -> Result<String, ParserError> {
    let file = spec.file;
    let mut out = String::new();

    for id in &spec.header {
        out.push_str(&file.comment(*id).text);
        out.push_str("\n\n");
    }
    if let Some(doc) = spec.package_doc {
        out.push_str(&file.comment(doc).text);
        out.push('\n');
    }
    out.push_str("package ");
    out.push_str(&file.package);
    out.push('\n');

    match spec.imports.as_slice() {
        _ if !spec.import_comments.is_empty() => render_import_block(spec, &mut out),
        [] => {}
        [single] => {
            out.push_str("\nimport ");
            out.push_str(&file.import(*single).text);
            out.push('\n');
        }
        many => {
            out.push_str("\nimport (\n");
            for id in many {
                out.push('\t');
                out.push_str(&file.import(*id).text);
                out.push('\n');
            }
            out.push_str(")\n");
        }
    }

    let mut items: Vec<(usize, Item)> = spec
        .declarations
        .iter()
        .map(|id| {
            let decl = file.declaration(*id);
            let start = decl.doc.map_or(decl.span.start, |doc| file.comment(doc).span.start);
            (start, Item::Decl(*id))
        })
        .chain(
            spec.comments
                .iter()
                .map(|id| (file.comment(*id).span.start, Item::Comment(*id))),
        )
        .collect();
    items.sort_by_key(|(start, _)| *start);

    let mut previous_end_line: Option<usize> = None;
    for (_, item) in items {
        match item {
            Item::Comment(id) => {
                let block = file.comment(id);
                if !block.starts_line && previous_end_line == Some(block.start_line) {
                    out.pop();
                    out.push(' ');
                } else {
                    out.push('\n');
                }
                out.push_str(&block.text);
                previous_end_line = Some(block.end_line);
            }
            Item::Decl(id) => {
                let decl = file.declaration(id);
                out.push('\n');
                if let Some(doc) = decl.doc {
                    out.push_str(&file.comment(doc).text);
                    out.push('\n');
                }
                out.push_str(file.text(decl.span));
                previous_end_line = Some(decl.end_line);
            }
        }
        out.push('\n');
    }

    if let Some(error) = first_syntax_error(&parse_source(&out)) {
        return Err(ParserError::InvalidOutput {
            line: error.line,
            message: format!("syntax error near `{}`", error.snippet),
        });
    }
    Ok(out)
}

/// Parenthesized import block with specs and comments in source order.
fn render_import_block(spec: &RenderFile<'_>, out: &mut String) {
    let file = spec.file;
    let mut lines: Vec<(usize, ImportLine)> = spec
        .imports
        .iter()
        .map(|id| (file.import(*id).span.start, ImportLine::Spec(*id)))
        .chain(
            spec.import_comments
                .iter()
                .map(|id| (file.comment(*id).span.start, ImportLine::Comment(*id))),
        )
        .collect();
    lines.sort_by_key(|(start, _)| *start);

    out.push_str("\nimport (\n");
    let mut spec_line: Option<usize> = None;
    for (_, line) in lines {
        match line {
            ImportLine::Spec(id) => {
                let import = file.import(id);
                out.push('\t');
                out.push_str(&import.text);
                spec_line = Some(import.line);
            }
            ImportLine::Comment(id) => {
                let block = file.comment(id);
                if !block.starts_line && spec_line == Some(block.start_line) {
                    out.pop();
                    out.push(' ');
                } else {
                    out.push('\t');
                }
                out.push_str(&block.text);
                spec_line = None;
            }
        }
        out.push('\n');
    }
    out.push_str(")\n");
}
