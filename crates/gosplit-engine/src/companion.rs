//! Splitting a source file's `_test.go` companion along with it.
//!
//! When `server.go` loses `StartServer` to `start_server.go`, the tests for
//! it in `server_test.go` move to `start_server_test.go`.

use gosplit_core::entities::SourceFile;

use crate::attribution::{AttributionPolicy, owned_comments};
use crate::extract::{Extraction, ExtractionMode, Selection};
use crate::naming::Namer;

/// Tests of a companion file matched to extracted functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionSplit {
    pub extraction: Extraction,
    /// The function each selection was matched to, parallel to
    /// `extraction.selected`.
    pub functions: Vec<String>,
}

impl CompanionSplit {
    /// `<function>_test.go` for each selection.
    #[must_use]
    pub fn targets(&self, namer: &Namer<'_>) -> Vec<String> {
        self.functions
            .iter()
            .map(|function| format!("{}_test.go", namer.function_stem(function)))
            .collect()
    }
}

/// The function a test named `test_name` exercises, if any.
///
/// With the prefix and leading underscores stripped, the name must start
/// with the function name followed by nothing, an underscore, or an
/// uppercase letter. `TestParse_Empty` and `TestParseError` match `Parse`;
/// `TestParser` does not. The longest matching function wins.
#[must_use]
pub fn tested_function<'f>(test_name: &str, prefix: &str, functions: &[&'f str]) -> Option<&'f str> {
    let rest = test_name.strip_prefix(prefix)?.trim_start_matches('_');
    functions
        .iter()
        .copied()
        .filter(|function| {
            !function.is_empty()
                && rest.strip_prefix(*function).is_some_and(|tail| {
                    tail.chars()
                        .next()
                        .is_none_or(|c| c == '_' || c.is_uppercase())
                })
        })
        .max_by_key(|function| function.len())
}

/// Select the tests of `file` that exercise one of `functions`.
#[must_use]
pub fn select_companion_tests(
    file: &SourceFile,
    functions: &[&str],
    prefix: &str,
    policy: AttributionPolicy,
) -> CompanionSplit {
    let docs = file.doc_comments();
    let mut split = CompanionSplit::default();
    for decl in file.code_declarations() {
        let matched = decl
            .as_function()
            .filter(|f| f.receiver.is_none())
            .and_then(|f| tested_function(&f.name, prefix, functions));
        match matched {
            Some(function) => {
                split.extraction.selected.push(Selection {
                    decl: decl.id,
                    mode: ExtractionMode::Tests,
                    comments: owned_comments(file, decl.id, &docs, policy),
                });
                split.functions.push(function.to_string());
            }
            None => split.extraction.has_remaining_content = true,
        }
    }
    split
}
