use pest::Parser;
use pest_derive::Parser;
use std::sync::Once;
use thiserror::Error;

pub mod errors;
pub mod evaluator;
pub mod functions;
pub mod graph;
pub mod operators;
pub mod syntax;
pub mod value;

pub use errors::{ErrorKind, EvalResult, EvaluationError};
pub use evaluator::{evaluate, BuiltinOperator, Scope, RECURSION_LIMIT};
pub use graph::{export_graph, Graph, GraphEdge, GraphNode};
pub use operators::{BinaryFn, OperatorTable};
pub use syntax::{parse_program, Node, NodeKind};
pub use value::{Builtin, Closure, Opaque, Value};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ExpressionParser;

#[derive(Error, Debug)]
pub enum InterpreterError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Malformed node tree: {0}")]
  TreeError(#[from] serde_json::Error),
  #[error("Evaluation error: {0}")]
  Evaluation(#[from] EvaluationError),
}

impl ExpressionParser {
  pub fn parse_declarations(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::declarations, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  ExpressionParser::parse_declarations(input)
}

/// Parse and evaluate `input` in a fresh scope with no operator table,
/// returning the displayed result.
pub fn interpret(input: &str) -> Result<String, InterpreterError> {
  let scope = Scope::new();
  let result = interpret_with_scope(input, &scope, None);
  let output = result.map(|value| value.to_string());
  scope.clear();
  output
}

/// Parse `input` and evaluate it against a caller-owned scope.
///
/// Top-level declarations are defined directly in `scope`, so consecutive
/// calls with the same scope see each other's definitions.
pub fn interpret_with_scope(
  input: &str,
  scope: &Scope,
  operators: Option<&OperatorTable>,
) -> Result<Value, InterpreterError> {
  let tree = syntax::parse_program(input)?;
  Ok(evaluate(&tree, scope, operators)?)
}

/// Evaluate a JSON node tree (`{"type", "text", "children"}`) as produced by
/// an external parser.
pub fn interpret_tree_json(
  json: &str,
  scope: &Scope,
  operators: Option<&OperatorTable>,
) -> Result<Value, InterpreterError> {
  let tree = Node::from_json(json)?;
  Ok(evaluate(&tree, scope, operators)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber.
///
/// `filter` takes precedence over `RUST_LOG`; with neither set nothing is
/// installed. Safe to call more than once.
pub fn init_tracing(filter: Option<&str>) {
  TRACING_INIT.call_once(|| {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match filter {
      Some(directives) => EnvFilter::new(directives),
      None if std::env::var("RUST_LOG").is_ok() => {
        EnvFilter::from_default_env()
      }
      None => return,
    };
    let _ = tracing_subscriber::registry()
      .with(
        fmt::layer()
          .with_writer(std::io::stderr)
          .with_target(true)
          .with_level(true),
      )
      .with(filter)
      .try_init();
  });
}
