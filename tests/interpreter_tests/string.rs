use super::*;

mod string_literals {
  use super::*;

  #[test]
  fn quotes_are_stripped() {
    assert_eq!(interpret(r#""hh(3,8)""#).unwrap(), "hh(3,8)");
    assert_eq!(interpret(r#""""#).unwrap(), "");
  }

  #[test]
  fn escapes_are_kept_verbatim() {
    assert_eq!(interpret(r#""a\"b""#).unwrap(), r#"a\"b"#);
  }

  #[test]
  fn plus_concatenates() {
    assert_eq!(interpret(r#""bd" + " sn""#).unwrap(), "bd sn");
    assert_eq!(interpret(r#""x" + 1"#).unwrap(), "x1");
    assert_eq!(interpret(r#"2 + "x""#).unwrap(), "2x");
  }

  #[test]
  fn other_arithmetic_on_strings_fails() {
    assert_eq!(eval_error(r#""a" * 2"#).kind, ErrorKind::Type);
    assert_eq!(eval_error(r#""a" - "b""#).kind, ErrorKind::Type);
  }

  #[test]
  fn unquoted_string_node_is_malformed() {
    let node = Node::leaf("string", "abc");
    let err = evaluate(&node, &Scope::new(), None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Shape);
    assert_eq!(err.tag, "string");
  }
}
