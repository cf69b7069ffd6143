//! The context --- to which formulas are added and within which solves take
//! place.
//!
//! Strictly, a [GenericContext] and a [Context].
//!
//! The generic context is generic over the source of randomness.
//! This helps distinguish generic context methods against those intended for
//! a particular application, and
//! [from_config](Context::from_config) is implemented for a context rather
//! than a generic context to avoid requiring a source of randomness to be
//! supplied alongside a config.
//!
//! # Example
//! ```rust
//! # use heron_asp::config::Config;
//! # use heron_asp::context::Context;
//! # use heron_asp::reports::Report;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.fresh_literal();
//! let q = ctx.fresh_literal();
//!
//! assert!(ctx.add_clause(vec![p, q]).is_ok());
//! assert!(ctx.add_clause(vec![-p]).is_ok());
//!
//! assert_eq!(ctx.solve(), Ok(Report::Coherent));
//! assert_eq!(ctx.value_of(q.atom()), Some(true));
//! # use heron_asp::structures::literal::Literal;
//! ```

pub mod callbacks;
mod counters;
mod generic;

pub use counters::Counters;
pub use generic::GenericContext;

use crate::generic::minimal_pcg::MinimalPCG32;

/// The canonical context, with randomness from a minimal PCG32.
pub type Context = GenericContext<MinimalPCG32>;

/// Why a context is incoherent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncoherenceOrigin {
    /// A conflict independent of any assumption: the formula itself is
    /// incoherent.
    Fundamental,

    /// A conflict under the assumptions of the present solve.
    Assumptions,
}

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context is being configured, and no clause has been added.
    Configuration,

    /// Input may be added to the context.
    Input,

    /// A solve is in progress.
    Solving,

    /// The formula is known to be coherent, with a complete valuation.
    Coherent,

    /// The formula is known to be incoherent, perhaps under assumptions.
    Incoherent(IncoherenceOrigin),
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Coherent => write!(f, "Coherent"),
            Self::Incoherent(_) => write!(f, "Incoherent"),
        }
    }
}
