//! Caller-supplied infix operators.
//!
//! An [`OperatorTable`] maps the exact text of an infix symbol to a binary
//! function over two already-evaluated operands. An entry always wins over
//! the built-in arithmetic and `$` handling, and keys are never validated:
//! `"|+|"`, `"#"` or even `"+"` are all accepted verbatim.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::errors::EvalResult;
use crate::value::Value;

pub type BinaryFn = dyn Fn(Value, Value) -> EvalResult<Value>;

/// Cheap to clone: closures keep a handle to the table they were defined
/// under so their bodies see the same operators when called later.
#[derive(Clone, Default)]
pub struct OperatorTable {
  entries: Rc<HashMap<String, Rc<BinaryFn>>>,
}

impl OperatorTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder form of [`OperatorTable::insert`].
  pub fn with(
    mut self,
    symbol: impl Into<String>,
    func: impl Fn(Value, Value) -> EvalResult<Value> + 'static,
  ) -> Self {
    self.insert(symbol, func);
    self
  }

  pub fn insert(
    &mut self,
    symbol: impl Into<String>,
    func: impl Fn(Value, Value) -> EvalResult<Value> + 'static,
  ) {
    Rc::make_mut(&mut self.entries).insert(symbol.into(), Rc::new(func));
  }

  pub fn get(&self, symbol: &str) -> Option<&BinaryFn> {
    self.entries.get(symbol).map(|func| func.as_ref())
  }

  pub fn contains(&self, symbol: &str) -> bool {
    self.entries.contains_key(symbol)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Registered symbols, sorted.
  pub fn symbols(&self) -> Vec<&str> {
    let mut symbols: Vec<&str> = self.entries.keys().map(String::as_str).collect();
    symbols.sort_unstable();
    symbols
  }
}

impl fmt::Debug for OperatorTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("OperatorTable").field(&self.symbols()).finish()
  }
}
