//! Top-level declaration processing.

use std::collections::BTreeSet;

use ast_grep_core::Node;
use gosplit_core::entities::{
    DeclKind, Declaration, FunctionDecl, GroupDecl, GroupKind, ImportAlias, ImportDecl,
    ImportSpec, Receiver, Span,
};
use gosplit_core::ids::{DeclId, ImportId};

use super::references;

/// Accumulates declarations and import specs in source order.
#[derive(Debug, Default)]
pub(super) struct DeclarationBuilder {
    declarations: Vec<Declaration>,
    imports: Vec<ImportSpec>,
}

impl DeclarationBuilder {
    pub(super) fn finish(self) -> (Vec<Declaration>, Vec<ImportSpec>) {
        (self.declarations, self.imports)
    }

    fn next_id(&self) -> DeclId {
        DeclId::new(self.declarations.len())
    }

    // ── function_declaration / method_declaration ─────────────────

    pub(super) fn push_function<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        let name = node
            .field("name")
            .map(|n| n.text().to_string())
            .unwrap_or_default();
        let receiver = node.field("receiver").map(|list| receiver_of(&list));
        let body = node.field("body").map(|block| Span::from(block.range()));
        self.push(node, DeclKind::Function(FunctionDecl { name, receiver }), body);
    }

    // ── const / var / type ────────────────────────────────────────

    pub(super) fn push_group<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, kind: GroupKind) {
        let members = group_members(node);
        self.push(node, DeclKind::Group(GroupDecl { kind, members }), None);
    }

    // ── import_declaration ────────────────────────────────────────

    pub(super) fn push_import<D: ast_grep_core::Doc>(&mut self, node: &Node<D>) {
        let decl = self.next_id();
        let mut specs = Vec::new();
        for spec in import_specs(node) {
            let id = ImportId::new(self.imports.len());
            let alias = spec.field("name").map_or(ImportAlias::None, |name| {
                match name.text().as_ref() {
                    "." => ImportAlias::Dot,
                    "_" => ImportAlias::Blank,
                    other => ImportAlias::Named(other.to_string()),
                }
            });
            let path = spec
                .field("path")
                .map(|p| p.text().trim_matches(['"', '`']).to_string())
                .unwrap_or_default();
            self.imports.push(ImportSpec {
                id,
                decl,
                alias,
                path,
                text: spec.text().to_string(),
                span: Span::from(spec.range()),
                line: spec.start_pos().line(),
            });
            specs.push(id);
        }
        self.push(node, DeclKind::Import(ImportDecl { specs }), None);
    }

    fn push<D: ast_grep_core::Doc>(&mut self, node: &Node<D>, kind: DeclKind, body: Option<Span>) {
        let references = if matches!(kind, DeclKind::Import(_)) {
            BTreeSet::new()
        } else {
            references::collect(node)
        };
        self.declarations.push(Declaration {
            id: self.next_id(),
            kind,
            span: Span::from(node.range()),
            start_line: node.start_pos().line(),
            end_line: node.end_pos().line(),
            body,
            doc: None,
            references,
        });
    }
}

// ── Receivers ─────────────────────────────────────────────────────

/// Receiver of a method from its `parameter_list`.
fn receiver_of<D: ast_grep_core::Doc>(list: &Node<D>) -> Receiver {
    let type_node = list
        .children()
        .find(|c| c.kind().as_ref() == "parameter_declaration")
        .and_then(|param| param.field("type"));
    let (type_name, pointer) = type_node.map_or((None, false), |t| receiver_type(&t));
    Receiver {
        text: list.text().to_string(),
        type_name,
        pointer,
    }
}

/// `T`, `*T`, `T[K]`, and `*T[K]` name `T`. Any other shape names nothing.
fn receiver_type<D: ast_grep_core::Doc>(node: &Node<D>) -> (Option<String>, bool) {
    if node.kind().as_ref() == "pointer_type" {
        let inner = node
            .children()
            .find(|c| matches!(c.kind().as_ref(), "type_identifier" | "generic_type"));
        return (inner.and_then(|n| base_type_name(&n)), true);
    }
    (base_type_name(node), false)
}

fn base_type_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    match node.kind().as_ref() {
        "type_identifier" => Some(node.text().to_string()),
        "generic_type" => node
            .field("type")
            .filter(|t| t.kind().as_ref() == "type_identifier")
            .map(|t| t.text().to_string()),
        _ => None,
    }
}

// ── Group members ─────────────────────────────────────────────────

fn group_members<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<String> {
    let mut members = Vec::new();
    for child in node.children() {
        match child.kind().as_ref() {
            "const_spec" | "var_spec" => members.extend(spec_names(&child)),
            "var_spec_list" => {
                for spec in child.children().filter(|c| c.kind().as_ref() == "var_spec") {
                    members.extend(spec_names(&spec));
                }
            }
            "type_spec" | "type_alias" => {
                members.extend(child.field("name").map(|n| n.text().to_string()));
            }
            _ => {}
        }
    }
    members
}

/// Names declared by a `const_spec` or `var_spec`.
fn spec_names<D: ast_grep_core::Doc>(spec: &Node<D>) -> Vec<String> {
    spec.children()
        .filter(|c| matches!(c.kind().as_ref(), "identifier" | "blank_identifier"))
        .map(|c| c.text().to_string())
        .collect()
}

fn import_specs<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    let mut specs = Vec::new();
    for child in node.children() {
        let kind = child.kind().into_owned();
        match kind.as_str() {
            "import_spec" => specs.push(child),
            "import_spec_list" => specs.extend(
                child
                    .children()
                    .filter(|c| c.kind().as_ref() == "import_spec"),
            ),
            _ => {}
        }
    }
    specs
}
