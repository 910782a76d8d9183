#[allow(unused_imports)]
use super::*;

use std::cell::Cell;

/// Most closure bodies that may be under evaluation at once on a thread.
pub const RECURSION_LIMIT: usize = 4096;

thread_local! {
  static CALL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one closure body on [`CALL_DEPTH`] for as long as it lives.
struct CallDepthGuard;

impl CallDepthGuard {
  fn enter() -> EvalResult<Self> {
    CALL_DEPTH.with(|depth| {
      if depth.get() >= RECURSION_LIMIT {
        return Err(EvaluationError::recursion_limit(RECURSION_LIMIT));
      }
      depth.set(depth.get() + 1);
      Ok(CallDepthGuard)
    })
  }
}

impl Drop for CallDepthGuard {
  fn drop(&mut self) {
    CALL_DEPTH.with(|depth| depth.set(depth.get() - 1));
  }
}

/// `function` node: `name`, `patterns`, body.
///
/// Builds a curried closure capturing `scope` by reference and stores it
/// under `name` in that same scope, so the body can refer to the function
/// itself once it is called.
pub(crate) fn define_function(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  let children = expect_children(node, 3)?;
  let (name, patterns, body) = (&children[0], &children[1], &children[2]);
  if name.node_kind() != NodeKind::Variable {
    return Err(EvaluationError::wrong_target(node, "function name", name));
  }
  if patterns.is_leaf() {
    return Err(EvaluationError::malformed(
      node,
      "expected at least one parameter",
    ));
  }
  let params = patterns
    .children
    .iter()
    .map(|param| match param.node_kind() {
      NodeKind::Variable => Ok(param.text.clone()),
      _ => Err(EvaluationError::wrong_target(node, "parameter", param)),
    })
    .collect::<EvalResult<Vec<_>>>()?;

  tracing::debug!(name = %name.text, ?params, "define function");
  let closure = Closure::new(
    &name.text,
    params,
    body.clone(),
    scope.clone(),
    operators.clone(),
  );
  let value = Value::Function(Rc::new(closure));
  scope.define(name.text.clone(), value.clone());
  Ok(value)
}

/// `apply` node: function expression, argument expression.
pub(crate) fn eval_apply(
  node: &Node,
  scope: &Scope,
  operators: &OperatorTable,
) -> EvalResult<Value> {
  let children = expect_children(node, 2)?;
  let callee = eval_node(&children[0], scope, operators)?;
  let argument = eval_node(&children[1], scope, operators)?;
  call_value(node, callee, argument)
}

/// Call `callee` with one argument; `node` is blamed if it is not callable.
pub(crate) fn call_value(
  node: &Node,
  callee: Value,
  argument: Value,
) -> EvalResult<Value> {
  callee.call_in(&node.kind, argument)
}

impl Closure {
  /// Bind the next parameter to `argument`.
  ///
  /// The binding goes into a fresh frame layered over the captured scope.
  /// With one parameter left the body is evaluated in that frame; otherwise
  /// a closure over the remaining parameters and the new frame is returned.
  ///
  /// Fails with a recursion error once [`RECURSION_LIMIT`] bodies are
  /// already being evaluated on this thread.
  pub fn call(&self, argument: Value) -> EvalResult<Value> {
    let parameter = &self.params[self.next];
    let frame = self.scope.extend(parameter.clone(), argument);
    if self.next + 1 == self.params.len() {
      let _depth = CallDepthGuard::enter()?;
      eval_node(&self.body, &frame, &self.operators)
    } else {
      Ok(Value::Function(Rc::new(Closure {
        name: Rc::clone(&self.name),
        params: Rc::clone(&self.params),
        next: self.next + 1,
        body: Rc::clone(&self.body),
        scope: frame,
        operators: self.operators.clone(),
      })))
    }
  }
}
