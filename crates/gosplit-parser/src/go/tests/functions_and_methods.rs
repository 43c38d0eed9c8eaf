use super::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn plain_function_has_no_receiver() {
    let file = parse("package p\n\nfunc Run() {}\n");
    let func = find_by_label(&file, "Run").as_function().expect("function");
    assert_eq!(func.name, "Run");
    assert!(func.receiver.is_none());
}

#[rstest]
#[case("func (s *Server) Start() {}", "Server", true)]
#[case("func (s Server) Start() {}", "Server", false)]
#[case("func (Server) Start() {}", "Server", false)]
#[case("func (l *List[T]) Start() {}", "List", true)]
#[case("func (l List[K, V]) Start() {}", "List", false)]
fn receiver_type_names(#[case] decl: &str, #[case] expected: &str, #[case] pointer: bool) {
    let file = parse(&format!("package p\n\n{decl}\n"));
    let func = file.declarations[0].as_function().expect("method");
    let receiver = func.receiver.as_ref().expect("receiver");
    assert_eq!(receiver.type_name.as_deref(), Some(expected));
    assert_eq!(receiver.pointer, pointer);
    assert_eq!(func.name, "Start");
}

#[test]
fn method_label_includes_receiver() {
    let file = parse("package p\n\nfunc (c *Cache) Flush() error { return nil }\n");
    assert_eq!(file.declarations[0].label(), "Cache.Flush");
}

#[test]
fn bodiless_function_has_no_body_span() {
    let file = parse("package p\n\nfunc now() int64\n");
    let decl = &file.declarations[0];
    assert!(decl.body.is_none());
    assert_eq!(decl.closing_offset(), decl.span.end);
}

#[test]
fn closing_offset_is_the_brace() {
    let src = "package p\n\nfunc Run() {\n}\n";
    let file = parse(src);
    let decl = &file.declarations[0];
    assert_eq!(&src[decl.closing_offset()..=decl.closing_offset()], "}");
}
