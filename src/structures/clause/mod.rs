//! Clauses, aka. collections of literals, interpreted as disjunctions.
//!
//! The canonical representation of a clause is a vector of literals.
//!
//! ```rust
//! # use heron_asp::structures::literal::{CLiteral, Literal};
//! # use heron_asp::structures::clause::Clause;
//! let clause = vec![CLiteral::new(3, true), CLiteral::new(5, false)];
//! assert_eq!(clause.size(), 2);
//!
//! let mut valuation = vec![None; 6];
//! valuation[3] = Some(false);
//! assert_eq!(clause.asserts(&valuation), Some(CLiteral::new(5, false)));
//! assert!(!clause.unsatisfiable_on(&valuation));
//!
//! valuation[5] = Some(true);
//! assert!(clause.unsatisfiable_on(&valuation));
//! ```
//!
//! - The empty clause is always false.
//! - A clause containing a single literal is a 'unit' clause, and is
//!   identified with its literal.

mod source;
pub use source::ClauseSource;

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
    valuation::Valuation,
};

/// The implementation of a clause as a vector of literals, the canonical form.
pub type CClause = Vec<CLiteral>;

/// The clause trait.
pub trait Clause {
    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// An iterator over the literals of the clause, order is not guaranteed.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// An iterator over the atoms of the clause, order is not guaranteed.
    fn atoms(&self) -> impl Iterator<Item = Atom>;

    /// Some string representation of the clause.
    fn as_string(&self) -> String;

    /// True if every literal of the clause conflicts with the given valuation.
    fn unsatisfiable_on(&self, valuation: &impl Valuation) -> bool;

    /// The literal asserted by the clause on the given valuation, if any.
    ///
    /// Some(*l*), if *l* has no value and every other literal conflicts with
    /// the valuation; None, otherwise.
    fn asserts(&self, valuation: &impl Valuation) -> Option<CLiteral>;
}

impl Clause for CClause {
    fn size(&self) -> usize {
        self.len()
    }

    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter().map(|literal| literal.atom())
    }

    fn as_string(&self) -> String {
        let mut string = String::with_capacity(3 * self.len());
        for literal in self {
            string.push_str(&format!("{literal} "));
        }
        string.pop();
        string
    }

    fn unsatisfiable_on(&self, valuation: &impl Valuation) -> bool {
        self.iter().all(|literal| {
            valuation
                .value_of(literal.atom())
                .is_some_and(|value| value != literal.polarity())
        })
    }

    fn asserts(&self, valuation: &impl Valuation) -> Option<CLiteral> {
        let mut asserted = None;
        for literal in self {
            match valuation.value_of(literal.atom()) {
                None => match asserted {
                    None => asserted = Some(*literal),
                    Some(_) => return None,
                },
                Some(value) if value == literal.polarity() => return None,
                Some(_) => {}
            }
        }
        asserted
    }
}

