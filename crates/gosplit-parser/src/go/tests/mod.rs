use super::*;
pub(super) use crate::error::ParserError;
pub(super) use gosplit_core::entities::{
    DeclKind, Declaration, GroupKind, ImportAlias, SourceFile,
};
use pretty_assertions::assert_eq;

mod errors;
mod functions_and_methods;
mod groups;

fn parse(source: &str) -> SourceFile {
    parse_go(source).expect("source should parse")
}

fn find_by_label<'a>(file: &'a SourceFile, label: &str) -> &'a Declaration {
    file.declarations
        .iter()
        .find(|d| d.label() == label)
        .unwrap_or_else(|| panic!("should find declaration labelled '{label}'"))
}

// ── Whole-file shape ───────────────────────────────────────────

#[test]
fn package_and_declaration_order() {
    let file = parse(
        r#"package store

import "fmt"

const Version = "1"

type Store struct{}

func (s *Store) Get() {}

func New() *Store { return &Store{} }
"#,
    );
    assert_eq!(file.package, "store");
    let labels: Vec<_> = file.declarations.iter().map(Declaration::label).collect();
    assert_eq!(
        labels,
        vec!["import", "const (Version)", "type (Store)", "Store.Get", "New"]
    );
    for (index, decl) in file.declarations.iter().enumerate() {
        assert_eq!(decl.id.index(), index);
    }
}

#[test]
fn spans_cover_declaration_text() {
    let src = "package p\n\nfunc Hello() string {\n\treturn \"hi\"\n}\n";
    let file = parse(src);
    let decl = find_by_label(&file, "Hello");
    assert_eq!(file.text(decl.span), "func Hello() string {\n\treturn \"hi\"\n}");
    assert_eq!(decl.start_line, 2);
    assert_eq!(decl.end_line, 4);
    let body = decl.body.expect("function has a body");
    assert_eq!(file.text(body), "{\n\treturn \"hi\"\n}");
}

#[test]
fn references_are_recorded_per_declaration() {
    let file = parse(
        "package p\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc A() { fmt.Println() }\n\nfunc B() { os.Exit(1) }\n",
    );
    assert!(find_by_label(&file, "A").references.contains("fmt"));
    assert!(!find_by_label(&file, "A").references.contains("os"));
    assert!(find_by_label(&file, "B").references.contains("os"));
}

#[test]
fn cgo_files_are_flagged() {
    let file = parse("package p\n\n// #include <stdio.h>\nimport \"C\"\n\nfunc F() {}\n");
    assert!(file.uses_cgo);
    let plain = parse("package p\n\nfunc F() {}\n");
    assert!(!plain.uses_cgo);
}
