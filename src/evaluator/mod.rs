//! Tree-walking evaluator.
//!
//! [`evaluate`] dispatches on each node's tag, threading one explicit
//! [`Scope`] and one [`OperatorTable`] through every recursive call.
//! Evaluation is strictly sequential and depth-first, left to right.

use std::rc::Rc;

use crate::errors::{EvalResult, EvaluationError};
use crate::operators::OperatorTable;
use crate::syntax::{Node, NodeKind, ASSIGNMENT_TOKEN};
use crate::value::{Closure, Value};

mod binary_ops;
mod core_eval;
mod function_application;
mod scoping;

pub use binary_ops::*;
pub use core_eval::*;
pub(crate) use function_application::*;
pub use function_application::RECURSION_LIMIT;
pub use scoping::*;
