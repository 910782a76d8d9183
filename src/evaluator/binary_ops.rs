#[allow(unused_imports)]
use super::*;

/// Infix symbols handled without an operator-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOperator {
  Plus,
  Minus,
  Times,
  Divide,
  /// `$`: low-precedence application.
  Apply,
}

impl BuiltinOperator {
  pub fn from_symbol(symbol: &str) -> Option<Self> {
    match symbol {
      "+" => Some(BuiltinOperator::Plus),
      "-" => Some(BuiltinOperator::Minus),
      "*" => Some(BuiltinOperator::Times),
      "/" => Some(BuiltinOperator::Divide),
      "$" => Some(BuiltinOperator::Apply),
      _ => None,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      BuiltinOperator::Plus => "+",
      BuiltinOperator::Minus => "-",
      BuiltinOperator::Times => "*",
      BuiltinOperator::Divide => "/",
      BuiltinOperator::Apply => "$",
    }
  }
}

/// `infix` node: left operand, operator token, right operand.
///
/// Both operands are evaluated, left first, before the symbol is resolved.
/// A table entry for the exact symbol text beats every built-in.
pub(crate) fn eval_infix(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  let children = expect_children(node, 3)?;
  let symbol = children[1].text.as_str();
  let left = eval_node(&children[0], scope, operators)?;
  let right = eval_node(&children[2], scope, operators)?;

  if let Some(custom) = operators.get(symbol) {
    tracing::debug!(symbol, "operator table");
    return custom(left, right);
  }
  match BuiltinOperator::from_symbol(symbol) {
    Some(op) => apply_builtin(node, op, left, right),
    None => Err(EvaluationError::unknown_operator(node, symbol)),
  }
}

pub(crate) fn apply_builtin(
  node: &Node,
  op: BuiltinOperator,
  left: Value,
  right: Value,
) -> EvalResult<Value> {
  use BuiltinOperator::*;

  match (op, left, right) {
    (Apply, callee, argument) => call_value(node, callee, argument),
    (Plus, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
    (Plus, Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
    (Plus, Value::String(a), b @ Value::Number(_)) => {
      Ok(Value::String(format!("{a}{b}")))
    }
    (Plus, a @ Value::Number(_), Value::String(b)) => {
      Ok(Value::String(format!("{a}{b}")))
    }
    (Minus, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
    (Times, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
    (Divide, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
    (op, left, right) => Err(EvaluationError::type_mismatch(
      node,
      op.symbol(),
      left.type_name(),
      right.type_name(),
    )),
  }
}
