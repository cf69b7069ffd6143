/*!
Unsat cores over assumptions.

When a solve under assumptions is incoherent, a subset of the assumptions
sufficient for the incoherence is computed by a final-conflict analysis,
derived from reading MiniSAT's `analyzeFinal`:

The conflict, if it exists, is due to some chain of propagation, and so long
as an assumption was used in some part of the chain, it was used to derive
the conflict.
Each part of the chain can be examined by walking the trail backwards: use of
a literal is then noted before the literal is assumed or derived, so marking
the atoms of the reason of each used literal visits every contributor.

The core is exposed in clause form: the negations of the contributing
assumptions, i.e. a clause entailed by the formula.

# Minimization

With minimization enabled the solve is repeated using only the assumptions of
the current core, with budgets lifted, until the core stops shrinking.
Each repeat is incoherent --- the core is sufficient --- so the loop
terminates with a (locally) minimal core at a fixpoint.
*/

use std::collections::HashSet;

use crate::{
    context::{ContextState, GenericContext, IncoherenceOrigin},
    misc::log::targets,
    structures::{
        atom::Atom,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The assumptions used to derive the noted conflict.
    ///
    /// To be called while the trail of the incoherent solve is intact.
    pub fn failed_assumptions(&self) -> Vec<CLiteral> {
        let mut assumptions: Vec<CLiteral> = Vec::default();

        if !self.trail.assumption_is_made() {
            return assumptions;
        }

        // Atoms in place of literals, as a literal and its negation cannot
        // both appear on the trail.
        let mut seen_atoms: HashSet<Atom> = HashSet::default();

        match &self.conflict {
            Some(conflict) => {
                // A directly falsified assumption is part of the core, though
                // never on the trail.
                if conflict.reason.is_none() && self.assumptions.contains(&conflict.literal) {
                    assumptions.push(conflict.literal);
                }

                match self.explain(conflict.literal, conflict.reason) {
                    Ok(clause) => {
                        for literal in &clause {
                            seen_atoms.insert(literal.atom());
                        }
                    }
                    Err(_) => {
                        seen_atoms.insert(conflict.literal.atom());
                    }
                };
            }
            None => return assumptions,
        }

        for literal in self.trail.assignments.iter().rev() {
            if !seen_atoms.contains(&literal.atom()) {
                continue;
            }

            match self.atom_db.source_of(literal.atom()) {
                AssignmentSource::Assumption => {
                    assumptions.push(*literal);
                }

                AssignmentSource::BCP(reason) => {
                    if let Ok(clause) = self.explain(*literal, Some(reason)) {
                        for reason_literal in &clause {
                            seen_atoms.insert(reason_literal.atom());
                        }
                    }
                }

                AssignmentSource::Decision | AssignmentSource::Unit => {}
            }
        }

        assumptions
    }

    /// The unsat core of the latest incoherent solve, in clause form: the
    /// negations of a subset of the assumptions sufficient for incoherence.
    ///
    /// None when no incoherence has been established; the empty clause when
    /// the incoherence is independent of any assumption.
    pub fn unsat_core(&self) -> Option<Vec<CLiteral>> {
        match self.state {
            ContextState::Incoherent(IncoherenceOrigin::Fundamental) => Some(Vec::default()),

            ContextState::Incoherent(IncoherenceOrigin::Assumptions) => Some(self.core.clone()),

            _ => None,
        }
    }

    /// Computes and stores the unsat core of the present conflict, minimizing
    /// when configured and requested.
    pub(crate) fn compute_unsat_core(&mut self, minimize: bool) -> Result<(), ErrorKind> {
        let failed = self.failed_assumptions();
        self.core = failed.iter().map(|literal| literal.negate()).collect();

        log::info!(target: targets::ANALYSIS, "Unsat core of {} assumptions.", self.core.len());

        if minimize && self.config.minimize_cores.value && self.core.len() > 2 {
            self.minimize_unsat_core()?;
        }

        Ok(())
    }

    /// Iteratively re-solves on the assumptions of the current core until the
    /// core stops shrinking, with decision and restart budgets lifted.
    fn minimize_unsat_core(&mut self) -> Result<(), ErrorKind> {
        let original_decision_limit = self.config.decision_limit.value;
        let original_restart_limit = self.config.restart_limit.value;
        self.config.decision_limit.value = 0;
        self.config.restart_limit.value = 0;

        loop {
            let previous_size = self.core.len();
            if previous_size <= 2 {
                break;
            }

            // For an optimization problem the core is shrunk over its soft
            // literals, as the weak-constraint algorithms expect; otherwise
            // every core literal is a candidate.
            let candidate: Vec<CLiteral> = match self.optimization.is_optimization_problem() {
                true => {
                    let marked: Vec<CLiteral> = self
                        .core
                        .iter()
                        .filter(|literal| self.watches.is_optimization(**literal))
                        .map(|literal| literal.negate())
                        .collect();

                    match marked.is_empty() {
                        true => self.core.iter().map(|literal| literal.negate()).collect(),
                        false => marked,
                    }
                }
                false => self.core.iter().map(|literal| literal.negate()).collect(),
            };

            self.clear_assumptions();
            self.clear_conflict();
            self.state = ContextState::Input;

            // The candidate is a core, so the solve is incoherent and
            // recomputes a (possibly smaller) core.
            match self.solve_given_without_minimization(candidate) {
                Ok(_) => {}
                Err(e) => {
                    self.config.decision_limit.value = original_decision_limit;
                    self.config.restart_limit.value = original_restart_limit;
                    return Err(e);
                }
            }

            if self.core.len() >= previous_size {
                break;
            }
        }

        self.config.decision_limit.value = original_decision_limit;
        self.config.restart_limit.value = original_restart_limit;
        Ok(())
    }
}
