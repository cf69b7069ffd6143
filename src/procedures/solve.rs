/*!
Determines the satisfiability of the formula in a context.

# Overview

Roughly, the loop is as diagrammed:

```none
          +---------------+
  +-------| make_decision |
  |       +---------------+
  |               ⌃
  |               |
  |               | if there is no update to the formula, and the valuation is partial
  |               |
  |               |              +-----> coherent, if the valuation is full
  ⌄   +--------------------+     |
--+-->| apply_consequences |-----+
  ⌃   +--------------------+     |
  |               |              +-----> incoherent, if apply_consequences fails
  |               |
  |               | if a clause is added to the formula
  |               |
  |               ⌄
  |          +----------+
  +----------| backjump |
             +----------+
```

[apply_consequences](crate::procedures::apply_consequences) drains the
propagation queue, interleaving unfounded-set checks and conflict analysis,
and each asserting clause it returns is valued here with the clause as
reason; restart and deletion scheduling follow each conflict.

Decisions consume assumptions first; a falsified assumption yields
incoherence under the assumptions and an unsat core.

Before a model is accepted every cyclic component is rechecked, so no
unfounded set survives to a reported model.

# Budgets

Three per-call budgets are checked once per iteration, in a fixed order:
seconds, then restarts, then decisions.
Exceeding any returns [Unknown](Report::Unknown) with the state of the
context reusable for a further solve.
*/

use crate::{
    context::{ContextState, GenericContext, IncoherenceOrigin},
    db::atom::AtomValue,
    misc::log::targets,
    procedures::{apply_consequences::ApplyConsequencesOk, decision::DecisionOk},
    reports::Report,
    structures::{
        consequence::{AssignmentSource, Reason},
        literal::{CLiteral, Literal},
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the formula of the context.
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        self.solve_internal(Vec::default(), true)
    }

    /// Determines the satisfiability of the formula of the context under the
    /// given assumptions.
    pub fn solve_given(&mut self, assumptions: Vec<CLiteral>) -> Result<Report, ErrorKind> {
        self.solve_internal(assumptions, true)
    }

    /// As [solve_given](GenericContext::solve_given), with core minimization
    /// withheld. Used while minimizing a core.
    pub(crate) fn solve_given_without_minimization(
        &mut self,
        assumptions: Vec<CLiteral>,
    ) -> Result<Report, ErrorKind> {
        self.solve_internal(assumptions, false)
    }

    fn solve_internal(
        &mut self,
        assumptions: Vec<CLiteral>,
        minimize_cores: bool,
    ) -> Result<Report, ErrorKind> {
        match self.state {
            ContextState::Solving => {
                // A budget-interrupted solve resumes; fresh assumptions
                // cannot be registered mid-solve.
                if !assumptions.is_empty() {
                    return Err(ErrorKind::InvalidState);
                }
            }

            ContextState::Incoherent(IncoherenceOrigin::Fundamental) => {
                return Ok(self.report());
            }

            ContextState::Coherent | ContextState::Incoherent(IncoherenceOrigin::Assumptions) => {
                if assumptions.is_empty() {
                    return Ok(self.report());
                }

                // A fresh query: reset the previous assumptions and model.
                self.clear_assumptions();
                self.clear_conflict();
                self.prepare_for_solve(assumptions);
            }

            ContextState::Configuration | ContextState::Input => {
                self.prepare_for_solve(assumptions);
            }
        }

        let timer = std::time::Instant::now();
        self.counters.fresh_decisions = 0;
        self.counters.fresh_restarts = 0;

        'solve_loop: loop {
            self.counters.total_iterations += 1;
            log::trace!("Iteration {}.", self.counters.total_iterations);

            // Budgets, in a fixed order: seconds, restarts, decisions.
            self.counters.time = timer.elapsed();
            let time_limit = self.config.time_limit.value;
            if !time_limit.is_zero() && self.counters.time > time_limit {
                return Ok(Report::Unknown);
            }

            let restart_limit = self.config.restart_limit.value;
            if restart_limit != 0 && self.counters.fresh_restarts >= restart_limit {
                return Ok(Report::Unknown);
            }

            let decision_limit = self.config.decision_limit.value;
            if decision_limit != 0 && self.counters.fresh_decisions >= decision_limit {
                return Ok(Report::Unknown);
            }

            let outcome = self.apply_consequences()?;

            match outcome {
                ApplyConsequencesOk::FundamentalConflict => {
                    self.note_fundamental_incoherence();
                    break 'solve_loop;
                }

                ApplyConsequencesOk::AssumptionConflict => {
                    self.compute_unsat_core(minimize_cores)?;
                    self.note_assumption_incoherence();
                    break 'solve_loop;
                }

                ApplyConsequencesOk::Exhausted => {
                    match self.make_decision() {
                        DecisionOk::Made => continue 'solve_loop,

                        DecisionOk::AssumptionFalsified(assumption) => {
                            self.note_conflict(assumption, None);
                            self.compute_unsat_core(minimize_cores)?;
                            self.note_assumption_incoherence();
                            break 'solve_loop;
                        }

                        DecisionOk::Exhausted => {
                            // A full sweep of unfounded-set checks guards
                            // model acceptance.
                            if !self.propagators.components.is_empty() {
                                self.queue_all_components();

                                match self.apply_consequences()? {
                                    ApplyConsequencesOk::Exhausted => {}

                                    ApplyConsequencesOk::FundamentalConflict => {
                                        self.note_fundamental_incoherence();
                                        break 'solve_loop;
                                    }

                                    ApplyConsequencesOk::AssumptionConflict => {
                                        self.compute_unsat_core(minimize_cores)?;
                                        self.note_assumption_incoherence();
                                        break 'solve_loop;
                                    }

                                    sweep_outcome => {
                                        if !self.assert_learned(sweep_outcome) {
                                            break 'solve_loop;
                                        }
                                        self.after_conflict_scheduling();
                                        continue 'solve_loop;
                                    }
                                }
                            }

                            log::info!(target: targets::VALUATION, "Model found.");
                            self.state = ContextState::Coherent;
                            self.make_callback_model();
                            break 'solve_loop;
                        }
                    }
                }

                learned => {
                    if !self.assert_learned(learned) {
                        break 'solve_loop;
                    }
                    self.after_conflict_scheduling();
                }
            }
        }

        Ok(self.report())
    }

    /// Values the literal asserted by a learned clause, with the clause as
    /// reason.
    ///
    /// Returns false when the assertion established fundamental incoherence.
    fn assert_learned(&mut self, outcome: ApplyConsequencesOk) -> bool {
        match outcome {
            ApplyConsequencesOk::UnitClause { literal } => {
                match self.atom_db.value_and_record(
                    &mut self.trail,
                    literal,
                    AssignmentSource::Unit,
                ) {
                    AtomValue::NotSet | AtomValue::Same => {}
                    AtomValue::Different => {
                        // The negation is proven at level zero.
                        self.note_conflict(literal, None);
                        self.note_fundamental_incoherence();
                        return false;
                    }
                }

                self.simplify_at_level_zero();
                true
            }

            ApplyConsequencesOk::AssertingBinary { literal, other } => {
                self.atom_db.value_and_record(
                    &mut self.trail,
                    literal,
                    AssignmentSource::BCP(Reason::Binary(other)),
                );
                true
            }

            ApplyConsequencesOk::AssertingClause { key, literal } => {
                self.atom_db.value_and_record(
                    &mut self.trail,
                    literal,
                    AssignmentSource::BCP(Reason::Clause(key)),
                );
                true
            }

            _ => true,
        }
    }

    /// Restart and deletion scheduling, after a conflict has been processed.
    fn after_conflict_scheduling(&mut self) {
        if self.restart_due() {
            self.restart();
        }

        self.reduce_if_due();
    }

    /// First-call preparation and assumption registration.
    fn prepare_for_solve(&mut self, assumptions: Vec<CLiteral>) {
        self.clause_db.initialise_deletion_threshold();

        for stale in std::mem::take(&mut self.assumptions) {
            self.atom_db.flags_mut(stale.atom()).assumption = false;
        }

        for assumption in &assumptions {
            self.atom_db.flags_mut(assumption.atom()).assumption = true;
        }

        self.trail.initial_decision_level = assumptions.len() as crate::db::LevelIndex;
        self.assumptions = assumptions;

        self.state = ContextState::Solving;
    }
}
