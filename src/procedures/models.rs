/*!
Model enumeration.

Models are enumerated by repeatedly solving and blocking each model found:
the blocking clause is the negation of the model's decision literals, so
adding the clause removes exactly the assignments reachable by the same
decisions --- in particular, the model --- from the solution set.

A model found without any decision is the unique model of the formula, and
its blocking clause is empty: enumeration then reports the count and the
formula becomes incoherent, as every model is blocked.

Each model is reported through the model callback before the blocking clause
is added.
*/

use crate::{
    context::{ContextState, GenericContext},
    reports::Report,
    structures::{
        clause::CClause,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Enumerates up to `bound` models, returning the count of models found.
    ///
    /// Each model found is blocked, so a subsequent call continues the
    /// enumeration.
    pub fn enumerate_models(&mut self, bound: usize) -> Result<usize, ErrorKind> {
        let mut count = 0;

        while count < bound {
            if self.state == ContextState::Coherent {
                self.clear_decisions();
            }

            match self.solve()? {
                Report::Coherent => {
                    count += 1;

                    let blocking = self.blocking_clause();
                    self.clear_decisions();

                    match self.add_clause(blocking) {
                        Ok(_) => {}
                        Err(ErrorKind::Build(err::BuildError::Unsatisfiable)) => break,
                        Err(e) => return Err(e),
                    }
                }

                Report::Incoherent => break,

                Report::Unknown => break,
            }
        }

        Ok(count)
    }

    /// The blocking clause of the current model: the negation of its decision
    /// literals.
    pub fn blocking_clause(&self) -> CClause {
        let mut clause = CClause::default();

        let floor = self.trail.initial_decision_level as usize;
        for level_start in self.trail.level_indicies.iter().skip(floor) {
            if let Some(literal) = self.trail.assignments.get(*level_start) {
                if matches!(
                    self.atom_db.source_of(literal.atom()),
                    AssignmentSource::Decision
                ) {
                    clause.push(literal.negate());
                }
            }
        }

        clause
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Adds the blocking clause of the current model and prepares the context
    /// for a further solve.
    ///
    /// For use from a model callback or after a
    /// [Coherent](crate::reports::Report::Coherent) report; enumeration
    /// through [enumerate_models](GenericContext::enumerate_models) does this
    /// internally.
    pub fn block_model(&mut self) -> Result<(), ErrorKind> {
        let blocking: CClause = self.blocking_clause();
        self.clear_decisions();
        self.add_clause(blocking).map(|_| ())
    }

    /// The current model as a list of literals, one per atom with a value,
    /// skipping the internal top atom.
    pub fn model_literals(&self) -> Vec<CLiteral> {
        use crate::structures::valuation::Valuation;

        let mut literals = Vec::default();
        for atom in 1..self.atom_db.valuation().atom_count() as u32 {
            if let Some(value) = self.atom_db.value_of(atom) {
                literals.push(CLiteral::new(atom, value));
            }
        }
        literals
    }
}
