//! Arena handles for one parse pass.
//!
//! Every declaration, comment block, and import spec of a [`SourceFile`] is
//! stored in a `Vec` and referred to by its position. Handles are only
//! meaningful for the file that produced them.
//!
//! [`SourceFile`]: crate::entities::SourceFile

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            #[must_use]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the item in its arena.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

arena_id!(
    /// Handle of a top-level declaration.
    DeclId,
    "decl"
);
arena_id!(
    /// Handle of a comment block.
    CommentId,
    "comment"
);
arena_id!(
    /// Handle of a single import spec.
    ImportId,
    "import"
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_kind_prefix() {
        assert_eq!(DeclId::new(3).to_string(), "decl#3");
        assert_eq!(CommentId::new(0).to_string(), "comment#0");
        assert_eq!(ImportId::new(12).to_string(), "import#12");
    }

    #[test]
    fn ids_order_by_index() {
        let mut ids = vec![DeclId::new(2), DeclId::new(0), DeclId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![DeclId::new(0), DeclId::new(1), DeclId::new(2)]);
    }

    #[test]
    fn serializes_as_bare_index() {
        assert_eq!(serde_json::to_string(&CommentId::new(7)).unwrap(), "7");
    }
}
