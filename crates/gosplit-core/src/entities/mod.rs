//! The parsed source model.
//!
//! A [`SourceFile`] is produced once per parse and never mutated. Everything
//! the engine derives from it (selections, output units, the remaining file)
//! refers back to it through the handles in [`crate::ids`].

mod comment;
mod declaration;
mod import;
mod source_file;
mod span;

pub use comment::CommentBlock;
pub use declaration::{
    DeclKind, Declaration, FunctionDecl, GroupDecl, GroupKind, ImportDecl, Receiver,
};
pub use import::{ImportAlias, ImportSpec};
pub use source_file::SourceFile;
pub use span::Span;

/// Go exports a name when its first character is an uppercase letter.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
