use super::*;

use hseval::Builtin;

/// Stand-in for a domain object only operator-table functions understand.
#[derive(Debug, Clone, PartialEq)]
struct Pattern(Vec<String>);

fn pattern_of(value: &Value) -> Result<Pattern, EvaluationError> {
  value.downcast_ref::<Pattern>().cloned().ok_or_else(|| {
    EvaluationError::new(
      ErrorKind::Type,
      "infix",
      format!("expected a pattern, found {}", value.type_name()),
    )
  })
}

fn pattern_scope() -> Scope {
  let scope = Scope::new();
  scope.define(
    "s",
    Value::Builtin(Builtin::new("s", |name| match name {
      Value::String(name) => Ok(Value::opaque(Pattern(vec![name]))),
      other => Err(EvaluationError::new(
        ErrorKind::Type,
        "apply",
        format!("s expects a string, found {}", other.type_name()),
      )),
    })),
  );
  scope
}

fn pattern_operators() -> OperatorTable {
  OperatorTable::new()
    .with("#", |a, b| {
      let (mut a, b) = (pattern_of(&a)?, pattern_of(&b)?);
      a.0.extend(b.0);
      Ok(Value::opaque(a))
    })
    .with("|+|", |a, b| {
      let (a, b) = (pattern_of(&a)?, pattern_of(&b)?);
      let zipped = a.0.iter().zip(&b.0).map(|(x, y)| format!("{x}:{y}"));
      Ok(Value::opaque(Pattern(zipped.collect())))
    })
}

mod operator_table {
  use super::*;

  #[test]
  fn composes_opaque_values() {
    let scope = pattern_scope();
    let ops = pattern_operators();
    let value =
      interpret_with_scope(r#"s "bd" # s "sn" # s "hh""#, &scope, Some(&ops))
        .unwrap();
    assert_eq!(
      value.downcast_ref::<Pattern>(),
      Some(&Pattern(vec!["bd".into(), "sn".into(), "hh".into()]))
    );
    assert_eq!(value.to_string(), "<opaque Pattern>");
  }

  #[test]
  fn decorated_symbols_are_accepted_verbatim() {
    let scope = pattern_scope();
    let ops = pattern_operators();
    let value = interpret_with_scope(
      r#"(s "bd" # s "sn") |+| (s "1" # s "2")"#,
      &scope,
      Some(&ops),
    )
    .unwrap();
    assert_eq!(
      value.downcast_ref::<Pattern>(),
      Some(&Pattern(vec!["bd:1".into(), "sn:2".into()]))
    );
  }

  #[test]
  fn table_wins_over_builtin_arithmetic() {
    let ops = OperatorTable::new()
      .with("+", |a, b| Ok(Value::String(format!("({a} plus {b})"))))
      .with("*", |_, _| Ok(Value::from(0)));
    let scope = Scope::new();
    assert_eq!(
      interpret_with_scope("1 + 2", &scope, Some(&ops)).unwrap(),
      Value::from("(1 plus 2)")
    );
    assert_eq!(
      interpret_with_scope("6 * 7", &scope, Some(&ops)).unwrap(),
      Value::from(0)
    );
    // untouched symbols keep their built-in meaning
    assert_eq!(
      interpret_with_scope("6 - 7", &scope, Some(&ops)).unwrap(),
      Value::from(-1)
    );
  }

  #[test]
  fn table_wins_over_dollar_application() {
    let ops = OperatorTable::new()
      .with("$", |a, b| Ok(Value::String(format!("{a}${b}"))));
    assert_eq!(
      interpret_with_scope("1 $ 2", &Scope::new(), Some(&ops)).unwrap(),
      Value::from("1$2")
    );
  }

  #[test]
  fn operators_are_visible_inside_function_bodies() {
    let scope = pattern_scope();
    let ops = pattern_operators();
    let value = interpret_with_scope(
      r#"twice p = p # p; twice (s "cp")"#,
      &scope,
      Some(&ops),
    )
    .unwrap();
    assert_eq!(
      value.downcast_ref::<Pattern>(),
      Some(&Pattern(vec!["cp".into(), "cp".into()]))
    );
    scope.clear();
  }

  #[test]
  fn operator_functions_can_call_function_values() {
    let ops = OperatorTable::new().with("|>", |x, f| f.call(x));
    let value = interpret_with_scope(
      "double n = n * 2; 3 |> double |> double",
      &Scope::new(),
      Some(&ops),
    );
    assert_eq!(value.unwrap(), Value::from(12));
  }

  #[test]
  fn operator_errors_propagate_unchanged() {
    let scope = pattern_scope();
    let ops = pattern_operators();
    match interpret_with_scope(r#"s "bd" # 1"#, &scope, Some(&ops)) {
      Err(InterpreterError::Evaluation(err)) => {
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.detail, "expected a pattern, found number");
      }
      other => panic!("expected a type error, got {other:?}"),
    }
  }

  #[test]
  fn unregistered_symbols_are_unknown() {
    let err = eval_error("1 <> 2");
    assert_eq!(err.kind, ErrorKind::UnknownOperator);
    assert_eq!(err.tag, "infix");
  }
}
