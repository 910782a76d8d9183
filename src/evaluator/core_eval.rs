#[allow(unused_imports)]
use super::*;

/// Evaluate `node` against `scope`.
///
/// `operators` overrides infix symbols; `None` means built-ins only. Any
/// node whose shape does not match its tag's contract fails with an
/// [`EvaluationError`]; nothing is ever defaulted.
pub fn evaluate(
  node: &Node,
  scope: &Scope,
  operators: Option<&OperatorTable>,
) -> EvalResult<Value> {
  match operators {
    Some(operators) => eval_node(node, scope, operators),
    None => eval_node(node, scope, &OperatorTable::new()),
  }
}

/// Recursive entry for every node; grows the stack on demand so deep trees
/// and call chains end in an error rather than an overflow.
pub(crate) fn eval_node(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  stacker::maybe_grow(64 * 1024, 2 * 1024 * 1024, || {
    eval_node_inner(node, scope, operators)
  })
}

fn eval_node_inner(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  tracing::trace!(tag = %node.kind, text = %node.text, "evaluate");
  match node.node_kind() {
    NodeKind::Declarations => {
      let mut result = Value::Unit;
      for declaration in &node.children {
        result = eval_node(declaration, scope, operators)?;
      }
      Ok(result)
    }
    NodeKind::Integer => {
      expect_leaf(node)?;
      parse_integer(node)
    }
    NodeKind::String => {
      expect_leaf(node)?;
      strip_quotes(node).map(|s| Value::String(s.to_owned()))
    }
    NodeKind::Function => define_function(node, scope, operators),
    NodeKind::Match => eval_match(node, scope, operators),
    NodeKind::Bind => eval_bind(node, scope, operators),
    NodeKind::Variable => {
      expect_leaf(node)?;
      scope
        .lookup(&node.text)
        .ok_or_else(|| EvaluationError::undefined_variable(node))
    }
    NodeKind::Infix => eval_infix(node, scope, operators),
    NodeKind::Apply => eval_apply(node, scope, operators),
    NodeKind::Parens => {
      let children = expect_children(node, 3)?;
      eval_node(&children[1], scope, operators)
    }
    NodeKind::Other => match node.children.as_slice() {
      [] => Err(EvaluationError::unsupported_leaf(node)),
      [only] => eval_node(only, scope, operators),
      _ => Err(EvaluationError::unsupported_branch(node)),
    },
  }
}

pub(crate) fn expect_children(node: &Node, count: usize) -> EvalResult<&[Node]> {
  if node.children.len() == count {
    Ok(&node.children)
  } else {
    Err(EvaluationError::shape(node, format!("{count} children")))
  }
}

fn expect_leaf(node: &Node) -> EvalResult<()> {
  if node.is_leaf() {
    Ok(())
  } else {
    Err(EvaluationError::shape(node, "a leaf"))
  }
}

fn parse_integer(node: &Node) -> EvalResult<Value> {
  let digits = node.text.as_str();
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return Err(EvaluationError::malformed(
      node,
      format!("{digits:?} is not a base-10 integer"),
    ));
  }
  digits
    .parse::<f64>()
    .map(Value::Number)
    .map_err(|e| EvaluationError::malformed(node, e.to_string()))
}

/// `"abc"` -> `abc`. Escapes are kept as written.
fn strip_quotes(node: &Node) -> EvalResult<&str> {
  node
    .text
    .strip_prefix('"')
    .and_then(|rest| rest.strip_suffix('"'))
    .ok_or_else(|| {
      EvaluationError::malformed(
        node,
        format!("{:?} is not a quoted string", node.text),
      )
    })
}

fn eval_match(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  let children = expect_children(node, 2)?;
  if children[0].text != ASSIGNMENT_TOKEN {
    return Err(EvaluationError::malformed(
      node,
      format!(
        "only simple assignments are supported, found {:?}",
        children[0].text
      ),
    ));
  }
  eval_node(&children[1], scope, operators)
}

fn eval_bind(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  let children = expect_children(node, 2)?;
  let (target, assignment) = (&children[0], &children[1]);
  if target.node_kind() != NodeKind::Variable {
    return Err(EvaluationError::wrong_target(node, "bind target", target));
  }
  if assignment.node_kind() != NodeKind::Match {
    return Err(EvaluationError::malformed(
      node,
      format!("expected match as second child, found `{}`", assignment.kind),
    ));
  }
  let value = eval_node(assignment, scope, operators)?;
  tracing::debug!(name = %target.text, value = %value, "bind");
  scope.define(target.text.clone(), value.clone());
  Ok(value)
}
