//! The procedures of a solve.
//!
//! Each procedure is implemented on the [context](crate::context) and
//! documented in its own module:
//!
//! - [bcp] --- propagation of a single literal: binary short propagation,
//!   unit propagation via watches, and aggregate dispatch.
//! - [apply_consequences] --- draining the propagation queue to fixpoint,
//!   interleaved with unfounded-set checks and conflict analysis.
//! - [analysis] --- first-UIP resolution, minimization, and learning.
//! - [backjump] --- recovery from a conflict.
//! - [decision] --- choosing the value of an atom, with assumptions first.
//! - [core] --- unsat cores over assumptions, and their minimization.
//! - [schedulers] --- restart and deletion triggers.
//! - [simplify] --- level-zero simplification and clause import.
//! - [models] --- model enumeration through blocking clauses.
//! - [solve] --- the main loop.

pub mod analysis;
pub mod apply_consequences;
pub mod backjump;
pub mod bcp;
pub mod core;
pub mod decision;
pub mod models;
pub mod schedulers;
pub mod simplify;
pub mod solve;
pub mod unfounded;
