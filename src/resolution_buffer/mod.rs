/*!
A buffer for applying resolution to a sequence of clauses.

Part of [conflict analysis](crate::procedures::analysis): the buffer holds
the clause under construction as per-atom cells, so merging a clause and
resolving on a pivot are constant time per literal.

# Setup

The buffer is built against the current valuation, with the cell of every
atom assigned at the *top* decision level cleared.
With this, a merged literal lands in one of two cells:

- A cleared cell: the literal is assigned at the top level, and counts
  towards the *valueless* count --- the count of top-level literals in the
  clause under construction.
- A valued cell: the literal conflicts with an assignment at some earlier
  level, and belongs to the derived clause as is.

# Resolution

Clauses are merged in reverse trail order, pivoting on top-level literals
already in the buffer.
When exactly one top-level literal remains the clause is asserting and the
remaining literal is the first unique implication point.

# Minimization

After the first UIP is reached literals may be removed:

- By self-subsumption, when every other literal of the reason of a removed
  literal is already in the clause or proven at level zero.
- By resolution against binary implications of the asserted literal, for
  learned clauses with a low block distance.
*/

use std::borrow::Borrow;

use crate::{
    misc::log::targets,
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
    types::err,
};

/// A cell of the resolution buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ResolutionCell {
    /// The atom, valued or not on the background valuation.
    Value(Option<bool>),

    /// A merged literal whose atom is assigned at the top level.
    NoneLiteral(CLiteral),

    /// A merged literal which conflicts with an earlier-level assignment.
    ConflictLiteral(CLiteral),

    /// A merged literal removed by minimization.
    Strengthened,

    /// A merged literal used as a resolution pivot.
    Pivot,
}

/// The resolution buffer.
pub struct ResolutionBuffer {
    /// A count of merged literals whose atoms are assigned at the top level.
    valueless_count: usize,

    /// The length of the clause under construction.
    clause_length: usize,

    /// The buffer.
    buffer: Vec<ResolutionCell>,

    /// The atoms merged into the buffer, for iteration and cleanup.
    merged_atoms: Vec<Atom>,
}

/// Possible 'Ok' results from resolution.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolutionOk {
    /// A unique implication point was identified.
    UIP,

    /// The merged clause was already asserting: no top-level literal, or
    /// exactly one before any resolution step.
    AlreadyAsserting,
}

impl ResolutionBuffer {
    /// A buffer over the given valuation, with the cells of `top_level`
    /// assignments cleared.
    pub fn from_valuation<'l>(
        valuation: &impl Valuation,
        top_level: impl Iterator<Item = &'l CLiteral>,
    ) -> Self {
        let mut buffer = ResolutionBuffer {
            valueless_count: 0,
            clause_length: 0,
            buffer: (0..valuation.atom_count())
                .map(|atom| ResolutionCell::Value(valuation.value_of(atom as Atom)))
                .collect(),
            merged_atoms: Vec::default(),
        };

        for literal in top_level {
            buffer.buffer[literal.atom() as usize] = ResolutionCell::Value(None);
        }

        buffer
    }

    /// The length of the clause under construction.
    pub fn clause_length(&self) -> usize {
        self.clause_length
    }

    /// A count of merged literals whose atoms are assigned at the top level.
    pub fn valueless_count(&self) -> usize {
        self.valueless_count
    }

    /// The atoms merged into the buffer, in no particular order.
    pub fn atoms_used(&self) -> impl Iterator<Item = Atom> + '_ {
        self.merged_atoms.iter().copied()
    }

    /// Merges the conflicting clause to begin resolution.
    pub fn merge_conflict(&mut self, clause: &impl Clause) -> Result<ResolutionOk, err::AnalysisError> {
        self.merge_clause(clause)?;

        match self.valueless_count {
            0 | 1 => Ok(ResolutionOk::AlreadyAsserting),
            _ => Ok(ResolutionOk::UIP),
        }
    }

    /// Resolves `clause` into the buffer on `pivot`, if the complement of
    /// `pivot` is in the buffer.
    ///
    /// Returns true when resolution was applied; false when the clause was
    /// not relevant to the resolution trail.
    pub fn resolve_clause<L: Borrow<CLiteral>>(
        &mut self,
        clause: &impl Clause,
        pivot: L,
    ) -> Result<bool, err::AnalysisError> {
        let pivot = pivot.borrow();
        match self.buffer[pivot.atom() as usize] {
            ResolutionCell::NoneLiteral(literal) if *pivot == literal.negate() => {
                self.merge_clause(clause)?;
                self.buffer[pivot.atom() as usize] = ResolutionCell::Pivot;
                self.clause_length -= 1;
                self.valueless_count -= 1;
                Ok(true)
            }

            ResolutionCell::ConflictLiteral(literal) if *pivot == literal.negate() => {
                self.merge_clause(clause)?;
                self.buffer[pivot.atom() as usize] = ResolutionCell::Pivot;
                self.clause_length -= 1;
                Ok(true)
            }

            _ => Ok(false),
        }
    }

    /// True if the atom of a merged literal remains in the clause under
    /// construction.
    pub fn contains_atom(&self, atom: Atom) -> bool {
        matches!(
            self.buffer[atom as usize],
            ResolutionCell::NoneLiteral(_) | ResolutionCell::ConflictLiteral(_)
        )
    }

    /// Removes the (earlier-level) literal of `atom` from the clause under
    /// construction, as established redundant by minimization.
    pub fn strengthen(&mut self, atom: Atom) {
        if let ResolutionCell::ConflictLiteral(_) = self.buffer[atom as usize] {
            self.buffer[atom as usize] = ResolutionCell::Strengthened;
            self.clause_length -= 1;
        }
    }

    /// The literal of `atom` in the clause under construction, if any.
    pub fn literal_of(&self, atom: Atom) -> Option<CLiteral> {
        match self.buffer[atom as usize] {
            ResolutionCell::NoneLiteral(literal) | ResolutionCell::ConflictLiteral(literal) => {
                Some(literal)
            }
            _ => None,
        }
    }

    /// The derived clause, with the asserted literal (if any) at position 0.
    ///
    /// Cells are not reset: the buffer is discarded after use.
    pub fn to_assertion_clause(&self) -> CClause {
        let mut clause = CClause::with_capacity(self.clause_length);
        let mut asserted: Option<CLiteral> = None;

        for atom in &self.merged_atoms {
            match self.buffer[*atom as usize] {
                ResolutionCell::ConflictLiteral(literal) => clause.push(literal),

                ResolutionCell::NoneLiteral(literal) => match asserted {
                    None => asserted = Some(literal),
                    // A second top-level literal: resolution stopped early.
                    Some(_) => clause.push(literal),
                },

                ResolutionCell::Value(_)
                | ResolutionCell::Strengthened
                | ResolutionCell::Pivot => {}
            }
        }

        match asserted {
            Some(literal) => {
                clause.insert(0, literal);
                clause
            }
            None => clause,
        }
    }
}

impl ResolutionBuffer {
    /// Merges a clause into the buffer.
    ///
    /// Cells already merged with some other clause are skipped; a satisfied
    /// cell is an error, as resolution never derives a satisfied clause.
    fn merge_clause(&mut self, clause: &impl Clause) -> Result<(), err::AnalysisError> {
        for literal in clause.literals() {
            match self.buffer[literal.atom() as usize] {
                ResolutionCell::ConflictLiteral(_)
                | ResolutionCell::NoneLiteral(_)
                | ResolutionCell::Pivot
                | ResolutionCell::Strengthened => {}

                ResolutionCell::Value(cell_value) => match cell_value {
                    None => {
                        self.merged_atoms.push(literal.atom());
                        self.clause_length += 1;
                        self.valueless_count += 1;
                        self.buffer[literal.atom() as usize] =
                            ResolutionCell::NoneLiteral(*literal);
                    }

                    Some(value) if value != literal.polarity() => {
                        self.merged_atoms.push(literal.atom());
                        self.clause_length += 1;
                        self.buffer[literal.atom() as usize] =
                            ResolutionCell::ConflictLiteral(*literal);
                    }

                    Some(_) => {
                        log::error!(target: targets::ANALYSIS, "Resolution to a satisfied clause.");
                        return Err(err::AnalysisError::NoAssertion);
                    }
                },
            }
        }
        Ok(())
    }
}
