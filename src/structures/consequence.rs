//! Assignments: atom-value binds together with the source of the bind.
//!
//! An assignment pairs a literal (the atom-value bind which must hold on the
//! current valuation) with the source of the bind: a decision, an assumption,
//! a unit clause, or propagation through some [Reason].
//!
//! # Reasons
//!
//! A reason is the implicant of a propagated assignment, represented as a
//! tagged variant rather than through dispatch on a trait object:
//!
//! - [Reason::Clause] — a clause stored in the clause database.
//! - [Reason::Binary] — an implicit binary clause, reconstructed on demand
//!   from the other literal of the clause.
//! - [Reason::Aggregate] — a pseudo-Boolean aggregate, identified by id,
//!   together with the length of the trail when the propagation was made so
//!   the aggregate can reconstruct the clause it implied.
//! - [Reason::LoopFormula] — a loop formula materialised by an unfounded-set
//!   check and stored in the clause database.
//!
//! Each variant supports the two operations conflict analysis requires:
//! the clause of the reason, and the literal at an index of that clause.
//! Both are provided by context methods, as reconstruction may consult the
//! clause database or a propagator.

use crate::{
    db::ClauseKey,
    propagators::AggregateId,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// The implicant of a propagated assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// A clause stored in the clause database, with the asserted literal
    /// first.
    Clause(ClauseKey),

    /// An implicit binary clause: the assigned literal together with the
    /// given (false) literal.
    Binary(CLiteral),

    /// A pseudo-Boolean aggregate, with the trail length at propagation time.
    Aggregate {
        /// The id of the aggregate.
        id: AggregateId,

        /// The length of the trail when the propagation was made.
        trail_length: usize,
    },

    /// A loop formula stored in the clause database.
    LoopFormula(ClauseKey),
}

/// The immediate source of an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentSource {
    /// A free decision on the value of the atom.
    Decision,

    /// An externally fixed literal bounding the solve.
    Assumption,

    /// A unit clause, original or derived, at level zero.
    Unit,

    /// Boolean constraint propagation through the given reason.
    BCP(Reason),
}

/// An atom-value bind which must hold on the current valuation, and its source.
#[derive(Clone, Copy, Debug)]
pub struct Assignment {
    /// The atom-value bind, represented as a literal.
    pub literal: CLiteral,

    /// The immediate source of the assignment.
    pub source: AssignmentSource,
}

impl Assignment {
    /// An assignment of `literal` with `source`.
    pub fn from(literal: CLiteral, source: AssignmentSource) -> Self {
        Assignment { literal, source }
    }

    /// The bound atom.
    pub fn atom(&self) -> Atom {
        self.literal.atom()
    }

    /// The value the atom is bound to.
    pub fn value(&self) -> bool {
        self.literal.polarity()
    }
}
