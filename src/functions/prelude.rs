//! Host functions that can be installed into a scope before evaluation.

use crate::errors::{ErrorKind, EvalResult, EvaluationError};
use crate::evaluator::Scope;
use crate::value::{Builtin, Value};

/// Curried numeric helpers: `add a b` and `mul a b`.
pub fn install(scope: &Scope) {
  scope.define("add", Value::Builtin(add()));
  scope.define("mul", Value::Builtin(mul()));
}

pub fn add() -> Builtin {
  Builtin::curried2("add", |a, b| numeric("add", a, b, |x, y| x + y))
}

pub fn mul() -> Builtin {
  Builtin::curried2("mul", |a, b| numeric("mul", a, b, |x, y| x * y))
}

fn numeric(
  name: &str,
  a: Value,
  b: Value,
  op: impl Fn(f64, f64) -> f64,
) -> EvalResult<Value> {
  match (a.as_number(), b.as_number()) {
    (Some(x), Some(y)) => Ok(Value::Number(op(x, y))),
    _ => Err(EvaluationError::new(
      ErrorKind::Type,
      "apply",
      format!(
        "{name} expects two numbers, found {} and {}",
        a.type_name(),
        b.type_name()
      ),
    )),
  }
}
