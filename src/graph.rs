//! Node/edge export of a syntax tree for an external layout engine.
//!
//! Ids are the dot-joined child indices from the root (`"0"`, `"0.1"`,
//! `"0.1.2"`, ...); labels are node tags.

use std::fmt::Write as _;

use serde::Serialize;

use crate::syntax::Node;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
  pub id: String,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
  pub source: String,
  pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
  pub nodes: Vec<GraphNode>,
  pub edges: Vec<GraphEdge>,
}

/// Pre-order walk: every node once, every non-root node one edge from its
/// parent.
pub fn export_graph(root: &Node) -> Graph {
  let mut graph = Graph::default();
  walk(root, "0".to_string(), None, &mut graph);
  graph
}

fn walk(node: &Node, id: String, parent: Option<&str>, graph: &mut Graph) {
  if let Some(parent) = parent {
    graph.edges.push(GraphEdge {
      source: parent.to_owned(),
      target: id.clone(),
    });
  }
  graph.nodes.push(GraphNode {
    id: id.clone(),
    label: node.kind.clone(),
  });
  for (index, child) in node.children.iter().enumerate() {
    walk(child, format!("{id}.{index}"), Some(&id), graph);
  }
}

#[derive(Serialize)]
struct JsonGraph<'a> {
  graph: &'a Graph,
}

impl Graph {
  /// JSON Graph Format document: `{"graph": {"nodes": [...], "edges": [...]}}`.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonGraph { graph: self })
  }

  /// Graphviz `digraph` source.
  pub fn to_dot(&self) -> String {
    let mut dot = String::from("digraph {\n");
    for node in &self.nodes {
      let _ = writeln!(
        dot,
        "  {} [label={}];",
        quote(&node.id),
        quote(&node.label)
      );
    }
    for edge in &self.edges {
      let _ = writeln!(dot, "  {} -> {};", quote(&edge.source), quote(&edge.target));
    }
    dot.push('}');
    dot.push('\n');
    dot
  }
}

fn quote(text: &str) -> String {
  let mut quoted = String::with_capacity(text.len() + 2);
  quoted.push('"');
  for c in text.chars() {
    match c {
      '"' | '\\' => {
        quoted.push('\\');
        quoted.push(c);
      }
      '\n' => quoted.push_str("\\n"),
      _ => quoted.push(c),
    }
  }
  quoted.push('"');
  quoted
}
