use pest::iterators::Pair;
use serde::{Deserialize, Serialize};

use crate::{parse, InterpreterError, Rule};

/// Text of the token that opens a `match` in assignment form.
pub const ASSIGNMENT_TOKEN: &str = "=";

/// One element of a parsed syntax tree.
///
/// Trees come from an external parser (usually as JSON) or from
/// [`parse_program`]. The evaluator only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
  #[serde(rename = "type")]
  pub kind: String,
  pub text: String,
  #[serde(default)]
  pub children: Vec<Node>,
}

impl Node {
  pub fn leaf(kind: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      text: text.into(),
      children: Vec::new(),
    }
  }

  pub fn branch(
    kind: impl Into<String>,
    text: impl Into<String>,
    children: Vec<Node>,
  ) -> Self {
    Self {
      kind: kind.into(),
      text: text.into(),
      children,
    }
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  /// Number of nodes in this subtree, including `self`.
  pub fn count(&self) -> usize {
    1 + self.children.iter().map(Node::count).sum::<usize>()
  }

  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}

/// Tags the evaluator has a dedicated handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  Declarations,
  Integer,
  String,
  Function,
  Match,
  Bind,
  Variable,
  Infix,
  Apply,
  Parens,
  /// Anything else: delegated if it wraps exactly one child.
  Other,
}

impl NodeKind {
  pub fn of(tag: &str) -> Self {
    match tag {
      "declarations" => NodeKind::Declarations,
      "integer" => NodeKind::Integer,
      "string" => NodeKind::String,
      "function" => NodeKind::Function,
      "match" => NodeKind::Match,
      "bind" => NodeKind::Bind,
      "variable" => NodeKind::Variable,
      "infix" => NodeKind::Infix,
      "apply" => NodeKind::Apply,
      "parens" => NodeKind::Parens,
      _ => NodeKind::Other,
    }
  }

  pub fn tag(self) -> Option<&'static str> {
    let tag = match self {
      NodeKind::Declarations => "declarations",
      NodeKind::Integer => "integer",
      NodeKind::String => "string",
      NodeKind::Function => "function",
      NodeKind::Match => "match",
      NodeKind::Bind => "bind",
      NodeKind::Variable => "variable",
      NodeKind::Infix => "infix",
      NodeKind::Apply => "apply",
      NodeKind::Parens => "parens",
      NodeKind::Other => return None,
    };
    Some(tag)
  }
}

impl Node {
  pub fn node_kind(&self) -> NodeKind {
    NodeKind::of(&self.kind)
  }
}

/// Parse source text into a node tree rooted at a `declarations` node.
pub fn parse_program(input: &str) -> Result<Node, InterpreterError> {
  let mut pairs = parse(input)?;
  match pairs.next() {
    Some(root) => Ok(pair_to_node(root, input).node),
    None => Ok(Node::leaf("declarations", input)),
  }
}

/// A node together with the byte range of source it was built from.
/// Folded operator chains need the range to slice out their own text.
struct Spanned {
  node: Node,
  start: usize,
  end: usize,
}

fn pair_to_node(pair: Pair<Rule>, source: &str) -> Spanned {
  let span = pair.as_span();
  let (start, end) = (span.start(), span.end());
  let text = pair.as_str().to_owned();
  let spanned = |node| Spanned { node, start, end };

  match pair.as_rule() {
    Rule::declarations
    | Rule::function
    | Rule::patterns
    | Rule::bind
    | Rule::assignment
    | Rule::top_splice
    | Rule::parens => {
      let kind = match pair.as_rule() {
        Rule::declarations => "declarations",
        Rule::function => "function",
        Rule::patterns => "patterns",
        Rule::bind => "bind",
        Rule::assignment => "match",
        Rule::top_splice => "top_splice",
        _ => "parens",
      };
      let children = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| pair_to_node(p, source).node)
        .collect();
      spanned(Node::branch(kind, text, children))
    }
    Rule::dollar_chain => {
      let mut items: Vec<_> =
        pair.into_inner().map(|p| pair_to_node(p, source)).collect();
      // operand (operator operand)*, folded from the right
      let mut acc = match items.pop() {
        Some(last) => last,
        None => return spanned(Node::leaf("declarations", text)),
      };
      while let (Some(op), Some(left)) = (items.pop(), items.pop()) {
        acc = infix(left, op, acc, source);
      }
      acc
    }
    Rule::custom_chain
    | Rule::additive_chain
    | Rule::multiplicative_chain => {
      let mut items = pair.into_inner().map(|p| pair_to_node(p, source));
      let mut acc = match items.next() {
        Some(first) => first,
        None => return spanned(Node::leaf("declarations", text)),
      };
      while let (Some(op), Some(right)) = (items.next(), items.next()) {
        acc = infix(acc, op, right, source);
      }
      acc
    }
    Rule::application => {
      let mut items = pair.into_inner().map(|p| pair_to_node(p, source));
      let mut acc = match items.next() {
        Some(first) => first,
        None => return spanned(Node::leaf("declarations", text)),
      };
      for argument in items {
        let (start, end) = (acc.start, argument.end);
        acc = Spanned {
          node: Node::branch(
            "apply",
            &source[start..end],
            vec![acc.node, argument.node],
          ),
          start,
          end,
        };
      }
      acc
    }
    Rule::dollar_operator
    | Rule::custom_operator
    | Rule::additive_operator
    | Rule::multiplicative_operator => spanned(Node::leaf("operator", text)),
    Rule::equals => spanned(Node::leaf(ASSIGNMENT_TOKEN, text)),
    Rule::open_paren => spanned(Node::leaf("(", text)),
    Rule::close_paren => spanned(Node::leaf(")", text)),
    Rule::integer => spanned(Node::leaf("integer", text)),
    Rule::string => spanned(Node::leaf("string", text)),
    Rule::variable => spanned(Node::leaf("variable", text)),
    other => spanned(Node::leaf(format!("{other:?}"), text)),
  }
}

fn infix(left: Spanned, op: Spanned, right: Spanned, source: &str) -> Spanned {
  let (start, end) = (left.start, right.end);
  Spanned {
    node: Node::branch(
      "infix",
      &source[start..end],
      vec![left.node, op.node, right.node],
    ),
    start,
    end,
  }
}
