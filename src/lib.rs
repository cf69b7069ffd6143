//! A library for the decision core of a conflict-driven answer-set solver:
//! clause-learning search extended with pseudo-Boolean aggregates,
//! unfounded-set checks for cyclic logic-program components, and
//! lexicographic optimization over weighted soft literals.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a
//! [context](crate::context).
//!
//! Contexts are built with a [configuration](crate::config), and formulas are
//! added programmatically: clauses through
//! [add_clause](crate::context::GenericContext::add_clause), aggregates
//! through [add_aggregate](crate::context::GenericContext::add_aggregate),
//! and cyclic-program structure through the dependency and support methods of
//! the [builder].
//!
//! Internally, and at a high level, a solve is viewed in terms of
//! manipulation of, and relationships between, a handful of databases:
//!
//! - A formula is stored in a [clause database](crate::db::clause).
//! - A valuation, and everything else per-atom, is stored in an
//!   [atom database](crate::db::atom).
//! - The assignments made follow each other on the [trail](crate::db::trail),
//!   whose cursor separates assignments propagated from those pending.
//!
//! Useful starting points:
//!
//! - The high-level [solve procedure](crate::procedures::solve) for the
//!   dynamics of a solve.
//! - The [propagators](crate::propagators) for the post-propagation
//!   framework: aggregates and unfounded-set checks.
//! - The [optimization driver](crate::optimization::driver) for search over
//!   cost vectors.
//!
//! # Examples
//!
//! Determine the satisfiability of a small formula, and read the model found.
//!
//! ```rust
//! # use heron_asp::config::Config;
//! # use heron_asp::context::Context;
//! # use heron_asp::reports::Report;
//! # use heron_asp::structures::literal::Literal;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal();
//! let q = ctx.fresh_literal();
//! let r = ctx.fresh_literal();
//!
//! assert!(ctx.add_clause(vec![p, q, r]).is_ok());
//! assert!(ctx.add_clause(vec![-p]).is_ok());
//! assert!(ctx.add_clause(vec![-q]).is_ok());
//!
//! assert_eq!(ctx.solve(), Ok(Report::Coherent));
//!
//! assert_eq!(ctx.value_of(p.atom()), Some(false));
//! assert_eq!(ctx.value_of(q.atom()), Some(false));
//! assert_eq!(ctx.value_of(r.atom()), Some(true));
//! ```
//!
//! Solve under assumptions and extract an unsat core.
//!
//! ```rust
//! # use heron_asp::config::Config;
//! # use heron_asp::context::Context;
//! # use heron_asp::reports::Report;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal();
//! let q = ctx.fresh_literal();
//!
//! assert!(ctx.add_clause(vec![-p, q]).is_ok());
//!
//! assert_eq!(ctx.solve_given(vec![p, -q]), Ok(Report::Incoherent));
//! assert!(ctx.unsat_core().is_some());
//! ```
//!
//! # Logs
//!
//! To help diagnose issues (somewhat) detailed calls to [log!](log) are made,
//! and a variety of targets are defined in order to help narrow output to
//! relevant parts of the library --- see [misc::log].
//!
//! For example, when used with
//! [env_logger](https://docs.rs/env_logger/latest/env_logger/), logs related
//! to propagation can be filtered with `RUST_LOG=propagation …`.

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod reports;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod optimization;
pub mod propagators;
pub mod resolution_buffer;
pub mod transfer;

pub mod misc;
