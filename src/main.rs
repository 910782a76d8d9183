use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use hseval::{
  export_graph, functions, interpret_tree_json, interpret_with_scope,
  parse_program, Scope,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Tracing filter directives (e.g. `hseval=trace`); overrides RUST_LOG
  #[arg(long, global = true, value_name = "FILTER")]
  log: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression or sequence of declarations
  Eval {
    /// Source text; declarations are separated by `;` or newlines
    expression: String,
    /// Bind the `add` and `mul` host functions before evaluating
    #[arg(long)]
    prelude: bool,
  },
  /// Evaluate a source file (`-` reads stdin)
  Run {
    file: PathBuf,
    #[arg(long)]
    prelude: bool,
  },
  /// Evaluate a JSON node tree produced by an external parser
  EvalTree {
    /// JSON file (`-` reads stdin)
    file: PathBuf,
    #[arg(long)]
    prelude: bool,
  },
  /// Print the node tree of an expression as JSON
  Parse { expression: String },
  /// Print the node/edge graph of an expression's tree
  Graph {
    expression: String,
    #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
    format: GraphFormat,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
  Json,
  Dot,
}

fn main() {
  let cli = Cli::parse();
  hseval::init_tracing(cli.log.as_deref());

  if let Err(e) = run(cli.command) {
    eprintln!("Error: {e:#}");
    std::process::exit(1);
  }
}

fn run(command: Commands) -> anyhow::Result<()> {
  match command {
    Commands::Eval {
      expression,
      prelude,
    } => {
      let scope = new_scope(prelude);
      let result = interpret_with_scope(&expression, &scope, None);
      print_result(result, &scope)
    }
    Commands::Run { file, prelude } => {
      let source = read_source(&file)?;
      let scope = new_scope(prelude);
      let result = interpret_with_scope(&source, &scope, None);
      print_result(result, &scope)
    }
    Commands::EvalTree { file, prelude } => {
      let json = read_source(&file)?;
      let scope = new_scope(prelude);
      let result = interpret_tree_json(&json, &scope, None);
      print_result(result, &scope)
    }
    Commands::Parse { expression } => {
      let tree = parse_program(&expression)?;
      println!("{}", tree.to_json()?);
      Ok(())
    }
    Commands::Graph { expression, format } => {
      let graph = export_graph(&parse_program(&expression)?);
      match format {
        GraphFormat::Json => println!("{}", graph.to_json()?),
        GraphFormat::Dot => print!("{}", graph.to_dot()),
      }
      Ok(())
    }
  }
}

fn new_scope(prelude: bool) -> Scope {
  let scope = Scope::new();
  if prelude {
    functions::install_prelude(&scope);
  }
  scope
}

fn print_result(
  result: Result<hseval::Value, hseval::InterpreterError>,
  scope: &Scope,
) -> anyhow::Result<()> {
  let output = result.map(|value| value.to_string());
  scope.clear();
  println!("{}", output?);
  Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<String> {
  if path == Path::new("-") {
    let mut source = String::new();
    std::io::stdin()
      .read_to_string(&mut source)
      .context("failed to read stdin")?;
    return Ok(source);
  }
  std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))
}
