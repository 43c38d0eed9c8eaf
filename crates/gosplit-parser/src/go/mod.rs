//! Go source model builder.
//!
//! Walks the top level of a tree-sitter-go tree and produces a
//! [`SourceFile`]: declarations in source order, comment blocks, import
//! specs, and doc bindings. Nested declarations are part of their enclosing
//! top-level declaration's text and are not modeled.

mod comments;
mod declarations;
mod references;

#[cfg(test)]
mod tests;

use gosplit_core::entities::{GroupKind, SourceFile, Span};
use tracing::debug;

use crate::error::ParserError;
use crate::parser::{first_syntax_error, parse_source};
use declarations::DeclarationBuilder;

/// Parse Go source into a [`SourceFile`].
///
/// # Errors
/// Returns [`ParserError::ParseFailed`] if the tree contains syntax errors or
/// a top-level statement, and [`ParserError::MissingPackage`] if there is no
/// `package` clause.
pub fn parse_go(source: &str) -> Result<SourceFile, ParserError> {
    let tree = parse_source(source);
    if let Some(error) = first_syntax_error(&tree) {
        return Err(ParserError::ParseFailed {
            line: error.line,
            message: format!("syntax error near `{}`", error.snippet),
        });
    }

    let root = tree.root();
    let package_node = root
        .children()
        .find(|c| c.kind().as_ref() == "package_clause")
        .ok_or(ParserError::MissingPackage)?;
    let package = package_node
        .children()
        .find(|c| c.kind().as_ref() == "package_identifier")
        .map(|n| n.text().to_string())
        .ok_or(ParserError::MissingPackage)?;
    let package_clause = Span::from(package_node.range());

    let blocks = comments::group(&comments::collect(&root, source), source);

    let mut builder = DeclarationBuilder::default();
    for child in root.children() {
        let kind = child.kind().into_owned();
        match kind.as_str() {
            "function_declaration" | "method_declaration" => builder.push_function(&child),
            "import_declaration" => builder.push_import(&child),
            "const_declaration" => builder.push_group(&child, GroupKind::Const),
            "var_declaration" => builder.push_group(&child, GroupKind::Var),
            "type_declaration" => builder.push_group(&child, GroupKind::Type),
            "package_clause" | "comment" => {}
            // anonymous terminators (`;`, newlines)
            other if !other.starts_with(|c: char| c.is_ascii_alphabetic()) => {}
            other => {
                return Err(ParserError::ParseFailed {
                    line: child.start_pos().line() + 1,
                    message: format!("unexpected top-level {other}"),
                });
            }
        }
    }
    let (mut declarations, imports) = builder.finish();

    for decl in &mut declarations {
        decl.doc = comments::bind_doc(&blocks, source, decl.start_line, decl.span.start);
    }
    let package_doc = comments::bind_doc(
        &blocks,
        source,
        package_node.start_pos().line(),
        package_clause.start,
    );
    let header = blocks
        .iter()
        .filter(|b| b.span.end <= package_clause.start && Some(b.id) != package_doc)
        .map(|b| b.id)
        .collect();
    let uses_cgo = imports.iter().any(|spec| spec.path == "C");

    debug!(
        package = %package,
        declarations = declarations.len(),
        comments = blocks.len(),
        imports = imports.len(),
        "parsed Go source"
    );

    Ok(SourceFile {
        package,
        package_clause,
        declarations,
        comments: blocks,
        imports,
        header,
        package_doc,
        uses_cgo,
        source: source.to_string(),
    })
}
