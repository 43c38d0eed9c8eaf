//! Import resolution for a group of declarations.

use std::collections::BTreeSet;

use gosplit_config::ImportConfig;
use gosplit_core::entities::{Declaration, SourceFile};
use gosplit_core::ids::{DeclId, ImportId};

/// Computes which of a file's imports a set of declarations needs.
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
    config: &'a ImportConfig,
}

impl<'a> ImportResolver<'a> {
    #[must_use]
    pub const fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// A receiver-less function named like a test, benchmark, example, or
    /// fuzz target.
    #[must_use]
    pub fn is_test_style(&self, decl: &Declaration) -> bool {
        decl.as_function().is_some_and(|f| {
            f.receiver.is_none()
                && self
                    .config
                    .test_prefixes
                    .iter()
                    .any(|prefix| has_test_prefix(&f.name, prefix))
        })
    }

    /// Imports of `file` used by `decls`, in original order.
    ///
    /// A single declaration is resolved as a group of one. Dot imports are
    /// always kept. Blank imports are never returned; callers place them.
    #[must_use]
    pub fn used_imports(&self, file: &SourceFile, decls: &[DeclId]) -> Vec<ImportId> {
        let group: Vec<&Declaration> = decls.iter().map(|id| file.declaration(*id)).collect();
        let referenced: BTreeSet<&str> = group
            .iter()
            .flat_map(|decl| decl.references.iter().map(String::as_str))
            .collect();
        let has_test_style = group.iter().any(|decl| self.is_test_style(decl));

        file.imports
            .iter()
            .filter(|spec| {
                if spec.is_blank() {
                    return false;
                }
                if spec.is_dot() {
                    return true;
                }
                if has_test_style && spec.path == self.config.always_required {
                    return true;
                }
                if spec
                    .local_names()
                    .iter()
                    .any(|name| referenced.contains(name.as_str()))
                {
                    return true;
                }
                self.config.assertion_libraries.iter().any(|lib| {
                    spec.path.contains(lib.path_fragment.as_str())
                        && referenced.contains(lib.short_name.as_str())
                })
            })
            .map(|spec| spec.id)
            .collect()
    }

    /// Blank (`_`) imports of `file`, in original order.
    #[must_use]
    pub fn blank_imports(file: &SourceFile) -> Vec<ImportId> {
        file.imports
            .iter()
            .filter(|spec| spec.is_blank())
            .map(|spec| spec.id)
            .collect()
    }
}

/// `name` is `prefix` alone, or `prefix` followed by anything but a
/// lowercase letter (`Testify` is not a test, `Test_run` and `Example` are).
fn has_test_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix).is_some_and(|rest| {
        rest.chars().next().is_none_or(|c| !c.is_lowercase())
    })
}
