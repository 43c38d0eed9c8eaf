use super::*;

#[test]
fn syntax_error_is_reported_with_line() {
    let error = parse_go("package p\n\nfunc Broken( {\n").unwrap_err();
    match error {
        ParserError::ParseFailed { line, .. } => assert!(line >= 3, "line {line}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_package_clause() {
    let error = parse_go("// nothing here\n").unwrap_err();
    assert!(matches!(error, ParserError::MissingPackage), "{error}");
}

#[test]
fn empty_file_after_package_parses() {
    let file = parse("package empty\n");
    assert!(file.declarations.is_empty());
    assert!(file.comments.is_empty());
}

#[test]
fn truncated_function_body_is_rejected() {
    let error = parse_go("package p\n\nfunc Run() {\n\tx := 1\n\t_ = x\n").unwrap_err();
    match error {
        ParserError::ParseFailed { message, .. } => {
            assert!(message.contains("missing"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
