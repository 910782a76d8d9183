use super::*;

mod arithmetic {
  use super::*;

  #[test]
  fn addition() {
    assert_eq!(interpret("1 + 2").unwrap(), "3");
    assert_eq!(interpret("1 + 2 + 3").unwrap(), "6");
    assert_eq!(interpret("(1 + 2) + 3").unwrap(), "6");
    assert_eq!(interpret("1 + (2 + 3)").unwrap(), "6");
  }

  #[test]
  fn subtraction_is_left_associative() {
    assert_eq!(interpret("7 - 3 - 1").unwrap(), "3");
    assert_eq!(interpret("7 - (3 - 1)").unwrap(), "5");
    assert_eq!(interpret("3 - 10").unwrap(), "-7");
  }

  #[test]
  fn multiplication_binds_tighter_than_addition() {
    assert_eq!(interpret("2 * 3 + 4 * 5").unwrap(), "26");
    assert_eq!(interpret("2 * (3 + 4) * 5").unwrap(), "70");
  }

  #[test]
  fn division_is_floating_point() {
    assert_eq!(interpret("10 / 2").unwrap(), "5");
    assert_eq!(interpret("10 / 4").unwrap(), "2.5");
    assert_eq!(interpret("1 / 0").unwrap(), "inf");
  }

  #[test]
  fn integer_literals_are_base_ten() {
    assert_eq!(interpret("007").unwrap(), "7");
    assert_eq!(interpret("12345678901").unwrap(), "12345678901");
  }

  #[test]
  fn tree_grouping_decides_evaluation_order() {
    // 1 + (2 * 3), grouping carried by a parens node
    let grouped = infix(
      int("1"),
      "+",
      Node::branch(
        "parens",
        "(2 * 3)",
        vec![
          Node::leaf("(", "("),
          infix(int("2"), "*", int("3")),
          Node::leaf(")", ")"),
        ],
      ),
    );
    assert_eq!(evaluate(&grouped, &Scope::new(), None), Ok(Value::from(7)));

    // (1 + 2) * 3 written as a tree, even though `*` usually binds tighter
    let regrouped = infix(infix(int("1"), "+", int("2")), "*", int("3"));
    assert_eq!(evaluate(&regrouped, &Scope::new(), None), Ok(Value::from(9)));
  }
}
