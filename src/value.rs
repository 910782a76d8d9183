//! Runtime values.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::errors::{EvalResult, EvaluationError};
use crate::evaluator::Scope;
use crate::operators::OperatorTable;
use crate::syntax::Node;

#[derive(Clone)]
pub enum Value {
  /// Result of an empty `declarations` node.
  Unit,
  Number(f64),
  String(String),
  /// Curried closure produced by a `function` node.
  Function(Rc<Closure>),
  /// Single-argument host function.
  Builtin(Builtin),
  /// Domain value passed through the evaluator untouched.
  Opaque(Opaque),
}

impl Value {
  pub fn opaque<T: Any>(value: T) -> Self {
    Value::Opaque(Opaque::new(value))
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Unit => "unit",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Function(_) => "function",
      Value::Builtin(_) => "builtin",
      Value::Opaque(_) => "opaque",
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    match self {
      Value::Opaque(opaque) => opaque.downcast_ref(),
      _ => None,
    }
  }

  /// Call this value with one argument, as an `apply` node would.
  pub fn call(&self, argument: Value) -> EvalResult<Value> {
    self.call_in("apply", argument)
  }

  /// Like [`Value::call`], blaming a node tagged `tag` if `self` is not
  /// callable.
  pub(crate) fn call_in(
    &self,
    tag: &str,
    argument: Value,
  ) -> EvalResult<Value> {
    match self {
      Value::Function(closure) => closure.call(argument),
      Value::Builtin(builtin) => builtin.call(argument),
      other => Err(EvaluationError::not_callable(tag, other.type_name())),
    }
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Unit, Value::Unit) => true,
      (Value::Number(a), Value::Number(b)) => a == b,
      (Value::String(a), Value::String(b)) => a == b,
      (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
      (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(&a.func, &b.func),
      (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(&a.inner, &b.inner),
      _ => false,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Unit => Ok(()),
      Value::Number(n) => write!(f, "{n}"),
      Value::String(s) => f.write_str(s),
      Value::Function(closure) => {
        write!(f, "<function {}/{}>", closure.name(), closure.arity())
      }
      Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name()),
      Value::Opaque(opaque) => write!(f, "<opaque {}>", opaque.type_name()),
    }
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Unit => f.write_str("Unit"),
      Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
      Value::String(s) => f.debug_tuple("String").field(s).finish(),
      Value::Function(closure) => fmt::Debug::fmt(closure, f),
      Value::Builtin(builtin) => fmt::Debug::fmt(builtin, f),
      Value::Opaque(opaque) => fmt::Debug::fmt(opaque, f),
    }
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    Value::Number(n)
  }
}

impl From<i32> for Value {
  fn from(n: i32) -> Self {
    Value::Number(f64::from(n))
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_owned())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

/// A function value that consumes its parameters one at a time.
///
/// `params[next..]` are still unbound; everything before `next` has been
/// layered onto `scope` by earlier calls. Never mutated after construction:
/// each call that does not complete the parameter list returns a new closure.
pub struct Closure {
  pub(crate) name: Rc<str>,
  pub(crate) params: Rc<[String]>,
  pub(crate) next: usize,
  pub(crate) body: Rc<Node>,
  pub(crate) scope: Scope,
  pub(crate) operators: OperatorTable,
}

impl Closure {
  pub(crate) fn new(
    name: &str,
    params: Vec<String>,
    body: Node,
    scope: Scope,
    operators: OperatorTable,
  ) -> Self {
    Self {
      name: Rc::from(name),
      params: Rc::from(params),
      next: 0,
      body: Rc::new(body),
      scope,
      operators,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn remaining_parameters(&self) -> &[String] {
    &self.params[self.next..]
  }

  pub fn arity(&self) -> usize {
    self.params.len() - self.next
  }

  pub fn body(&self) -> &Node {
    &self.body
  }

  pub fn captured_scope(&self) -> &Scope {
    &self.scope
  }
}

impl fmt::Debug for Closure {
  // The captured scope usually contains this closure, so it is not printed.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Closure")
      .field("name", &self.name)
      .field("remaining_parameters", &self.remaining_parameters())
      .field("body", &self.body.text)
      .finish_non_exhaustive()
  }
}

pub type HostFn = dyn Fn(Value) -> EvalResult<Value>;

/// A named host function taking exactly one argument.
#[derive(Clone)]
pub struct Builtin {
  name: Rc<str>,
  func: Rc<HostFn>,
}

impl Builtin {
  pub fn new(
    name: &str,
    func: impl Fn(Value) -> EvalResult<Value> + 'static,
  ) -> Self {
    Self {
      name: Rc::from(name),
      func: Rc::new(func),
    }
  }

  /// Curried two-argument host function: `f a` returns a builtin that
  /// finishes the call with `b`.
  pub fn curried2(
    name: &str,
    func: impl Fn(Value, Value) -> EvalResult<Value> + 'static,
  ) -> Self {
    let func: Rc<dyn Fn(Value, Value) -> EvalResult<Value>> = Rc::new(func);
    let outer_name: Rc<str> = Rc::from(name);
    Self::new(name, move |first| {
      let func = Rc::clone(&func);
      Ok(Value::Builtin(Builtin::new(&outer_name, move |second| {
        func(first.clone(), second)
      })))
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn call(&self, argument: Value) -> EvalResult<Value> {
    (self.func)(argument)
  }
}

impl fmt::Debug for Builtin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Builtin").field(&self.name).finish()
  }
}

/// Shared handle to an arbitrary `'static` value.
#[derive(Clone)]
pub struct Opaque {
  type_name: &'static str,
  inner: Rc<dyn Any>,
}

impl Opaque {
  pub fn new<T: Any>(value: T) -> Self {
    let full = std::any::type_name::<T>();
    Self {
      type_name: full.rsplit("::").next().unwrap_or(full),
      inner: Rc::new(value),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.inner.downcast_ref()
  }
}

impl fmt::Debug for Opaque {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Opaque").field(&self.type_name).finish()
  }
}
