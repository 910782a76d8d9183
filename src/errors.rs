//! Evaluation errors.
//!
//! Every failure raised while walking a node tree is an [`EvaluationError`]:
//! one struct with a [`ErrorKind`] discriminant, the tag of the node that
//! violated its contract and a short description of what was expected.
//! Constructors live here so call sites stay one line long.

use std::fmt;

use thiserror::Error;

use crate::syntax::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// Child count or child tag does not match the node's contract.
  Shape,
  /// A tag with no handler, and zero or more than one child.
  UnsupportedNode,
  /// Infix symbol neither in the operator table nor built in.
  UnknownOperator,
  /// Non-callable in call position, wrong target kind, or bad operand types.
  Type,
  /// Lookup of an unbound name.
  Name,
  /// Nested function calls went past the recursion limit.
  Recursion,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ErrorKind::Shape => "ShapeError",
      ErrorKind::UnsupportedNode => "UnsupportedNodeError",
      ErrorKind::UnknownOperator => "UnknownOperatorError",
      ErrorKind::Type => "TypeError",
      ErrorKind::Name => "NameError",
      ErrorKind::Recursion => "RecursionError",
    };
    f.write_str(name)
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} in `{tag}` node: {detail}")]
pub struct EvaluationError {
  pub kind: ErrorKind,
  /// Tag of the offending node.
  pub tag: String,
  /// Expected shape, or what went wrong.
  pub detail: String,
}

pub type EvalResult<T> = Result<T, EvaluationError>;

impl EvaluationError {
  pub fn new(
    kind: ErrorKind,
    tag: impl Into<String>,
    detail: impl Into<String>,
  ) -> Self {
    Self {
      kind,
      tag: tag.into(),
      detail: detail.into(),
    }
  }

  /// Wrong number of children.
  pub fn shape(node: &Node, expected: impl fmt::Display) -> Self {
    Self::new(
      ErrorKind::Shape,
      &node.kind,
      format!(
        "expected {expected}, found {} children",
        node.children.len()
      ),
    )
  }

  /// Right arity, malformed content (bad child tag, bad literal text).
  pub fn malformed(node: &Node, detail: impl Into<String>) -> Self {
    Self::new(ErrorKind::Shape, &node.kind, detail)
  }

  pub fn unsupported_leaf(node: &Node) -> Self {
    Self::new(
      ErrorKind::UnsupportedNode,
      &node.kind,
      format!("unhandled leaf type with text {:?}", node.text),
    )
  }

  pub fn unsupported_branch(node: &Node) -> Self {
    Self::new(
      ErrorKind::UnsupportedNode,
      &node.kind,
      format!(
        "unhandled branch type with {} children",
        node.children.len()
      ),
    )
  }

  pub fn unknown_operator(node: &Node, symbol: &str) -> Self {
    Self::new(
      ErrorKind::UnknownOperator,
      &node.kind,
      format!("unexpected infix operator {symbol}"),
    )
  }

  pub fn not_callable(tag: &str, found: &str) -> Self {
    Self::new(
      ErrorKind::Type,
      tag,
      format!("expected a function in call position, found {found}"),
    )
  }

  pub fn recursion_limit(limit: usize) -> Self {
    Self::new(
      ErrorKind::Recursion,
      "apply",
      format!("recursion depth exceeded {limit} nested calls"),
    )
  }

  /// Binding target (bind name, function name, parameter) of the wrong kind.
  pub fn wrong_target(node: &Node, role: &str, found: &Node) -> Self {
    Self::new(
      ErrorKind::Type,
      &node.kind,
      format!("expected variable as {role}, found `{}`", found.kind),
    )
  }

  pub fn type_mismatch(
    node: &Node,
    symbol: &str,
    left: &str,
    right: &str,
  ) -> Self {
    Self::new(
      ErrorKind::Type,
      &node.kind,
      format!("operator {symbol} does not apply to {left} and {right}"),
    )
  }

  pub fn undefined_variable(node: &Node) -> Self {
    Self::new(
      ErrorKind::Name,
      &node.kind,
      format!("{} is not defined", node.text),
    )
  }
}
