//! Declaration selection.
//!
//! An [`Extractor`] walks the top-level declarations of a parsed file and
//! selects the ones matching a set of [`ExtractionMode`]s, each with the
//! comments it owns.

use std::collections::BTreeSet;

use gosplit_core::entities::{Declaration, SourceFile, is_exported};
use gosplit_core::ids::DeclId;
use tracing::debug;

use crate::attribution::{AttributionPolicy, OwnedComments, owned_comments};

/// One selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    /// Exported functions without a receiver.
    PublicFunctions,
    /// Exported methods whose receiver names a type.
    PublicMethods,
    /// const/var/type groups with at least one exported member.
    PublicGroups,
    /// Test functions whose name continues with an uppercase letter after
    /// the test prefix.
    Tests,
}

/// A selected declaration and its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub decl: DeclId,
    pub mode: ExtractionMode,
    pub comments: OwnedComments,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Selected declarations in source order.
    pub selected: Vec<Selection>,
    /// At least one non-import declaration was not selected.
    pub has_remaining_content: bool,
}

impl Extraction {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn decl_ids(&self) -> BTreeSet<DeclId> {
        self.selected.iter().map(|s| s.decl).collect()
    }

    /// Every comment owned by a selected declaration.
    #[must_use]
    pub fn owned_comments(&self) -> BTreeSet<gosplit_core::ids::CommentId> {
        self.selected.iter().flat_map(|s| s.comments.iter()).collect()
    }
}

/// Returns `true` for names like `TestServer` or `Test_Server`: the prefix,
/// optional underscores, then an uppercase letter.
#[must_use]
pub fn is_test_name(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .map(|rest| rest.trim_start_matches('_'))
        .is_some_and(is_exported)
}

#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    policy: AttributionPolicy,
    test_prefix: &'a str,
}

impl<'a> Extractor<'a> {
    #[must_use]
    pub const fn new(policy: AttributionPolicy, test_prefix: &'a str) -> Self {
        Self {
            policy,
            test_prefix,
        }
    }

    /// Does `decl` qualify under `mode`?
    #[must_use]
    pub fn matches(&self, decl: &Declaration, mode: ExtractionMode) -> bool {
        match mode {
            ExtractionMode::PublicGroups => decl.as_group().is_some() && decl.is_public(),
            ExtractionMode::PublicFunctions => decl
                .as_function()
                .is_some_and(|f| f.receiver.is_none() && is_exported(&f.name)),
            ExtractionMode::PublicMethods => decl.as_function().is_some_and(|f| {
                is_exported(&f.name)
                    && f.receiver
                        .as_ref()
                        .is_some_and(|r| r.type_name.is_some())
            }),
            ExtractionMode::Tests => decl
                .as_function()
                .is_some_and(|f| f.receiver.is_none() && is_test_name(&f.name, self.test_prefix)),
        }
    }

    /// Select from `file` under `modes`. A declaration matching several
    /// modes is selected once, under the first of them.
    #[must_use]
    pub fn extract(&self, file: &SourceFile, modes: &[ExtractionMode]) -> Extraction {
        let docs = file.doc_comments();
        let mut extraction = Extraction::default();
        for decl in file.code_declarations() {
            match modes.iter().copied().find(|mode| self.matches(decl, *mode)) {
                Some(mode) => {
                    debug!(decl = %decl.label(), ?mode, "selected");
                    extraction.selected.push(Selection {
                        decl: decl.id,
                        mode,
                        comments: owned_comments(file, decl.id, &docs, self.policy),
                    });
                }
                None => extraction.has_remaining_content = true,
            }
        }
        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosplit_parser::parse_go;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const PUBLIC: &[ExtractionMode] = &[
        ExtractionMode::PublicFunctions,
        ExtractionMode::PublicMethods,
        ExtractionMode::PublicGroups,
    ];

    fn extract(source: &str, modes: &[ExtractionMode]) -> (SourceFile, Extraction) {
        let file = parse_go(source).expect("fixture parses");
        let extraction = Extractor::new(AttributionPolicy::new(4000), "Test").extract(&file, modes);
        (file, extraction)
    }

    fn labels(file: &SourceFile, extraction: &Extraction) -> Vec<String> {
        extraction
            .selected
            .iter()
            .map(|s| file.declaration(s.decl).label())
            .collect()
    }

    #[rstest]
    #[case("TestServer", true)]
    #[case("Test_Server", true)]
    #[case("Test__Server", true)]
    #[case("Test", false)]
    #[case("Test_", false)]
    #[case("Test_lowercase", false)]
    #[case("Testify", false)]
    #[case("BenchmarkServer", false)]
    #[case("helperTest", false)]
    fn test_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_test_name(name, "Test"), expected, "{name}");
    }

    #[test]
    fn public_modes_select_in_source_order() {
        let (file, extraction) = extract(
            r"package p

type Server struct{}

const (
	maxConns = 10
	Version  = 1
)

var debug = false

func (s *Server) Start() {}

func (s Server) stop() {}

func New() *Server { return &Server{} }

func helper() {}
",
            PUBLIC,
        );
        assert_eq!(
            labels(&file, &extraction),
            vec!["type (Server)", "const (maxConns, Version)", "Server.Start", "New"]
        );
        assert!(extraction.has_remaining_content);
    }

    #[test]
    fn private_only_group_is_never_selected() {
        let (_, extraction) = extract("package p\n\nvar (\n\ta = 1\n\tb = 2\n)\n", PUBLIC);
        assert!(extraction.is_empty());
        assert!(extraction.has_remaining_content);
    }

    #[test]
    fn method_on_unnamed_receiver_shape_is_skipped() {
        let (file, extraction) = extract(
            "package p\n\ntype Pair [2]int\n\nfunc (p *Pair) Sum() int { return p[0] + p[1] }\n",
            &[ExtractionMode::PublicMethods],
        );
        assert_eq!(labels(&file, &extraction), vec!["Pair.Sum"]);

        let (_, extraction) = extract(
            "package p\n\nfunc (p [2]int) Sum() int { return 0 }\n",
            &[ExtractionMode::PublicMethods],
        );
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_mode_flags_unmatched_tests_as_remaining() {
        let (file, extraction) = extract(
            r#"package p

import "testing"

func TestServer(t *testing.T) {}

func Test_lowercase(t *testing.T) {}

func Test(t *testing.T) {}

func (s *suite) TestMethod(t *testing.T) {}
"#,
            &[ExtractionMode::Tests],
        );
        assert_eq!(labels(&file, &extraction), vec!["TestServer"]);
        assert!(extraction.has_remaining_content);
    }

    #[test]
    fn all_selected_means_nothing_remains() {
        let (_, extraction) = extract(
            "package p\n\nimport \"testing\"\n\nfunc TestA(t *testing.T) {}\n\nfunc TestB(t *testing.T) {}\n",
            &[ExtractionMode::Tests],
        );
        assert_eq!(extraction.selected.len(), 2);
        assert!(!extraction.has_remaining_content);
    }

    #[test]
    fn declaration_matching_two_modes_is_selected_once() {
        let (_, extraction) = extract(
            "package p\n\nfunc TestLike() {}\n",
            &[ExtractionMode::PublicFunctions, ExtractionMode::Tests],
        );
        assert_eq!(extraction.selected.len(), 1);
        assert_eq!(extraction.selected[0].mode, ExtractionMode::PublicFunctions);
    }

    #[test]
    fn owned_comments_are_collected() {
        let (file, extraction) = extract(
            "package p\n\n// loose\n\n// Run runs.\nfunc Run() {\n\t// inside\n}\n",
            &[ExtractionMode::PublicFunctions],
        );
        let owned: Vec<_> = extraction
            .owned_comments()
            .into_iter()
            .map(|id| file.comment(id).text.clone())
            .collect();
        assert_eq!(owned, vec!["// loose", "// Run runs.", "// inside"]);
    }
}
