use super::*;

mod external_trees {
  use super::*;
  use hseval::interpret_tree_json;

  // Shape of a tree-sitter Haskell dump for:
  //   add x y = x + y
  //   add 2 $ 3 * 4
  const PROGRAM: &str = r#"{
    "type": "declarations",
    "text": "add x y = x + y\nadd 2 $ 3 * 4",
    "children": [
      {
        "type": "function",
        "text": "add x y = x + y",
        "children": [
          { "type": "variable", "text": "add" },
          {
            "type": "patterns",
            "text": "x y",
            "children": [
              { "type": "variable", "text": "x" },
              { "type": "variable", "text": "y" }
            ]
          },
          {
            "type": "match",
            "text": "= x + y",
            "children": [
              { "type": "=", "text": "=" },
              {
                "type": "infix",
                "text": "x + y",
                "children": [
                  { "type": "variable", "text": "x" },
                  { "type": "operator", "text": "+" },
                  { "type": "variable", "text": "y" }
                ]
              }
            ]
          }
        ]
      },
      {
        "type": "top_splice",
        "text": "add 2 $ 3 * 4",
        "children": [
          {
            "type": "infix",
            "text": "add 2 $ 3 * 4",
            "children": [
              {
                "type": "apply",
                "text": "add 2",
                "children": [
                  { "type": "variable", "text": "add" },
                  { "type": "integer", "text": "2" }
                ]
              },
              { "type": "operator", "text": "$" },
              {
                "type": "infix",
                "text": "3 * 4",
                "children": [
                  { "type": "integer", "text": "3" },
                  { "type": "operator", "text": "*" },
                  { "type": "integer", "text": "4" }
                ]
              }
            ]
          }
        ]
      }
    ]
  }"#;

  #[test]
  fn evaluates_a_json_tree() {
    let scope = Scope::new();
    let value = interpret_tree_json(PROGRAM, &scope, None).unwrap();
    assert_eq!(value, Value::from(14));
    assert!(scope.contains("add"));
    scope.clear();
  }

  #[test]
  fn json_tree_matches_the_reference_front_end() {
    let external = Node::from_json(PROGRAM).unwrap();
    let parsed =
      hseval::parse_program("add x y = x + y\nadd 2 $ 3 * 4").unwrap();
    assert_eq!(parsed, external);
  }

  #[test]
  fn malformed_json_is_a_tree_error() {
    let result = interpret_tree_json(r#"{"type": 1}"#, &Scope::new(), None);
    assert!(matches!(result, Err(InterpreterError::TreeError(_))));
  }
}
