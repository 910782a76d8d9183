#[allow(unused_imports)]
use super::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

#[derive(Default)]
struct Frame {
  bindings: HashMap<String, Value>,
  parent: Option<Scope>,
}

/// Shared handle to a mutable name-to-value frame.
///
/// Cloning a `Scope` clones the handle, not the bindings: [`Scope::define`]
/// through any clone is visible to every holder. [`Scope::extend`] layers a
/// fresh frame on top instead, leaving the receiver untouched; lookups
/// through the layered frame fall back to the receiver at lookup time.
///
/// A function defined in a scope captures that scope and is stored in it,
/// so the two keep each other alive. Call [`Scope::clear`] on a top-level
/// scope once it is no longer needed to release them.
#[derive(Clone, Default)]
pub struct Scope(Rc<RefCell<Frame>>);

impl Scope {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lookup(&self, name: &str) -> Option<Value> {
    let mut current = self.clone();
    loop {
      let parent = {
        let frame = current.0.borrow();
        if let Some(value) = frame.bindings.get(name) {
          return Some(value.clone());
        }
        frame.parent.clone()
      };
      match parent {
        Some(parent) => current = parent,
        None => return None,
      }
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.lookup(name).is_some()
  }

  /// Bind `name` in this frame, replacing any previous binding.
  pub fn define(&self, name: impl Into<String>, value: Value) {
    self.0.borrow_mut().bindings.insert(name.into(), value);
  }

  /// New scope with `name` bound on top of this one.
  pub fn extend(&self, name: impl Into<String>, value: Value) -> Scope {
    let mut bindings = HashMap::with_capacity(1);
    bindings.insert(name.into(), value);
    Scope(Rc::new(RefCell::new(Frame {
      bindings,
      parent: Some(self.clone()),
    })))
  }

  /// Whether both handles point at the same frame.
  pub fn same_frame(&self, other: &Scope) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }

  /// Names bound directly in this frame, sorted.
  pub fn local_names(&self) -> Vec<String> {
    let mut names: Vec<String> =
      self.0.borrow().bindings.keys().cloned().collect();
    names.sort_unstable();
    names
  }

  /// Drop every binding in this frame.
  pub fn clear(&self) {
    let bindings = std::mem::take(&mut self.0.borrow_mut().bindings);
    drop(bindings);
  }
}

impl fmt::Debug for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let frame = self.0.borrow();
    f.debug_struct("Scope")
      .field("names", &self.local_names())
      .field("has_parent", &frame.parent.is_some())
      .finish()
  }
}
