use super::*;
use pretty_assertions::assert_eq;

fn members(file: &SourceFile, index: usize) -> (GroupKind, Vec<String>) {
    let group = file.declarations[index].as_group().expect("group");
    (group.kind, group.members.clone())
}

#[test]
fn const_block_members() {
    let file = parse("package p\n\nconst (\n\tA = iota\n\tb\n\tC, d = 1, 2\n)\n");
    assert_eq!(
        members(&file, 0),
        (GroupKind::Const, vec!["A".into(), "b".into(), "C".into(), "d".into()])
    );
    assert!(file.declarations[0].is_public());
}

#[test]
fn var_single_and_block() {
    let file = parse("package p\n\nvar x = 1\n\nvar (\n\ty, Z int\n\t_ = x\n)\n");
    assert_eq!(members(&file, 0), (GroupKind::Var, vec!["x".into()]));
    let (kind, names) = members(&file, 1);
    assert_eq!(kind, GroupKind::Var);
    assert_eq!(&names[..2], &["y".to_string(), "Z".to_string()]);
    assert!(!file.declarations[0].is_public());
    assert!(file.declarations[1].is_public());
}

#[test]
fn type_specs_and_aliases() {
    let file = parse(
        "package p\n\ntype (\n\tServer struct{ addr string }\n\thandler func()\n\tID = string\n)\n",
    );
    assert_eq!(
        members(&file, 0),
        (
            GroupKind::Type,
            vec!["Server".into(), "handler".into(), "ID".into()]
        )
    );
}

#[test]
fn interior_comments_are_part_of_group_text() {
    let src = "package p\n\nconst (\n\t// first\n\tA = 1\n\tB = 2 // second\n)\n";
    let file = parse(src);
    let group = &file.declarations[0];
    for block in &file.comments {
        assert!(group.interior().contains(block.span), "{}", block.text);
    }
    assert!(file.text(group.span).contains("// second"));
}
