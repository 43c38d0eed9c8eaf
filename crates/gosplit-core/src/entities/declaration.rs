use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Span, is_exported};
use crate::ids::{CommentId, DeclId, ImportId};

/// A top-level declaration of a Go source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    pub span: Span,
    /// Zero-based line of the first token.
    pub start_line: usize,
    /// Zero-based line of the last token.
    pub end_line: usize,
    /// The `{ ... }` block of a function. `None` for groups and bodiless functions.
    pub body: Option<Span>,
    /// Doc comment bound by the parser.
    pub doc: Option<CommentId>,
    /// Identifiers that may name an imported package: selector operands,
    /// qualified-type packages, call targets, and free identifiers.
    pub references: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    Function(FunctionDecl),
    Group(GroupDecl),
    Import(ImportDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
}

/// Receiver of a method.
///
/// `type_name` is `None` when the receiver type is not `T`, `*T`, or one of
/// those with type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub text: String,
    pub type_name: Option<String>,
    pub pointer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDecl {
    pub kind: GroupKind,
    /// Declared names in source order (`_` included).
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Const,
    Var,
    Type,
}

impl GroupKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Var => "var",
            Self::Type => "type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub specs: Vec<ImportId>,
}

impl Declaration {
    #[must_use]
    pub const fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(func) => Some(func),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_group(&self) -> Option<&GroupDecl> {
        match &self.kind {
            DeclKind::Group(group) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_import(&self) -> bool {
        matches!(self.kind, DeclKind::Import(_))
    }

    /// Function name, for functions and methods.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.as_function().map(|func| func.name.as_str())
    }

    /// Short human label used in logs and reports.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            DeclKind::Function(func) => match func.receiver.as_ref().and_then(|r| r.type_name.as_deref()) {
                Some(recv) => format!("{recv}.{}", func.name),
                None => func.name.clone(),
            },
            DeclKind::Group(group) => {
                format!("{} ({})", group.kind.keyword(), group.members.join(", "))
            }
            DeclKind::Import(_) => "import".to_string(),
        }
    }

    /// Whether any declared name is exported.
    #[must_use]
    pub fn is_public(&self) -> bool {
        match &self.kind {
            DeclKind::Function(func) => is_exported(&func.name),
            DeclKind::Group(group) => group.members.iter().any(|m| is_exported(m)),
            DeclKind::Import(_) => false,
        }
    }

    /// Offset used as "the end" of this declaration when it precedes another:
    /// the closing brace for functions with a body, the exclusive end otherwise.
    #[must_use]
    pub const fn closing_offset(&self) -> usize {
        match self.body {
            Some(body) if matches!(self.kind, DeclKind::Function(_)) => body.end.saturating_sub(1),
            _ => self.span.end,
        }
    }

    /// Region whose comments are inline: the body block, or the whole span
    /// for declarations without one.
    #[must_use]
    pub fn interior(&self) -> Span {
        self.body.unwrap_or(self.span)
    }
}
