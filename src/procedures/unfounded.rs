/*!
Runs pending unfounded-set checks at propagation fixpoint.

Each queued [component](crate::propagators::component) is checked in
insertion order.
For every unfounded atom *a* the check produced a loop formula with `¬a`
first and the (false) external bodies of the unfounded set after, and:

- If *a* has no value, the formula is stored and `¬a` is valued with the
  formula as reason.
- If *a* is true, the formula conflicts with the current valuation.
  When the formula contains a literal of the current decision level the
  conflict is noted for analysis as usual.
  Otherwise the conflict was detectable at some earlier level --- possible,
  as a check may be queued by the final sweep before a model is accepted ---
  and an immediate backjump is made to the level at which the formula is
  asserting (or the level below its maximum, when several literals share the
  maximum), with the formula stored for propagation to catch.

Loop formulas are stored as addition clauses (binary ones in the implication
lists), so implicants, deletion locking, and core extraction treat them
uniformly.

After any backjump made here every component is requeued: the check
invalidates trail positions other pending checks may have relied on.
*/

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets,
    propagators::ComponentId,
    structures::{
        atom::Atom,
        clause::{CClause, ClauseSource},
        consequence::{AssignmentSource, Reason},
        literal::Literal,
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Runs pending unfounded-set checks.
    ///
    /// Returns true when the trail or valuation changed (propagation should
    /// resume); a noted conflict is left for the caller to route.
    pub fn run_unfounded_checks(&mut self) -> Result<bool, ErrorKind> {
        let pending = self.propagators.take_pending();

        for id in pending {
            let unfounded = {
                let component = &self.propagators.components[id as usize];
                component.unfounded_atoms(&self.atom_db)
            };

            if unfounded.is_empty() {
                continue;
            }

            log::info!(target: targets::UNFOUNDED, "Component {id}: {} unfounded atoms.", unfounded.len());

            for (atom, loop_formula) in unfounded {
                match self.atom_db.value_of(atom) {
                    // Falsified by an earlier loop formula of this sweep.
                    Some(false) => continue,

                    None => {
                        self.assert_loop_formula(loop_formula)?;
                        return Ok(true);
                    }

                    Some(true) => {
                        let changed = self.conflicting_loop_formula(atom, loop_formula)?;
                        return Ok(changed);
                    }
                }
            }
        }

        Ok(false)
    }

    /// Queues every cyclic component for a check, e.g. before a model is
    /// accepted or after a backjump made during a check.
    pub fn queue_all_components(&mut self) {
        for id in 0..self.propagators.components.len() {
            self.propagators.queue_component(id as ComponentId);
        }
    }

    /// Stores a loop formula asserting its first literal and values that
    /// literal with the formula as reason.
    fn assert_loop_formula(&mut self, mut formula: CClause) -> Result<(), ErrorKind> {
        let asserted = formula[0];

        match formula.len() {
            1 => {
                // No external support exists at all: the atom is false in
                // every model.
                self.backjump(0);
                self.atom_db
                    .value_and_record(&mut self.trail, asserted, AssignmentSource::Unit);
                self.queue_all_components();
            }

            2 => {
                let other = formula[1];
                self.watches.watch_binary(asserted, other);
                self.watches.watch_binary(other, asserted);
                self.atom_db.value_and_record(
                    &mut self.trail,
                    asserted,
                    AssignmentSource::BCP(Reason::Binary(other)),
                );
            }

            _ => {
                self.place_max_level_second(&mut formula);
                let key =
                    self.clause_db
                        .store(formula, ClauseSource::LoopFormula, &mut self.watches)?;
                self.atom_db.value_and_record(
                    &mut self.trail,
                    asserted,
                    AssignmentSource::BCP(Reason::LoopFormula(key)),
                );
            }
        }

        Ok(())
    }

    /// Handles a loop formula falsified on the current valuation.
    ///
    /// Returns true when a backjump was made, false when a conflict was noted
    /// for analysis.
    fn conflicting_loop_formula(
        &mut self,
        atom: Atom,
        formula: CClause,
    ) -> Result<bool, ErrorKind> {
        let max_level = formula
            .iter()
            .filter_map(|literal| self.atom_db.level_of(literal.atom()))
            .max()
            .unwrap_or(0);

        if max_level == self.trail.level() {
            // A conflict for the usual analysis path.
            let negation = formula[0];

            match formula.len() {
                1 => self.note_conflict(negation, None),

                2 => {
                    let other = formula[1];
                    self.watches.watch_binary(negation, other);
                    self.watches.watch_binary(other, negation);
                    self.note_conflict(negation, Some(Reason::Binary(other)));
                }

                _ => {
                    let mut formula = formula;
                    self.place_max_level_second(&mut formula);
                    let key = self.clause_db.store(
                        formula,
                        ClauseSource::LoopFormula,
                        &mut self.watches,
                    )?;
                    self.note_conflict(negation, Some(Reason::LoopFormula(key)));
                }
            }

            return Ok(false);
        }

        // The formula was falsified at some earlier level.
        log::info!(target: targets::UNFOUNDED, "Loop formula for {atom} falsified at level {max_level}.");

        if max_level == 0 {
            self.backjump(0);
            self.note_conflict(formula[0], None);
            return Ok(false);
        }

        let at_max = formula
            .iter()
            .filter(|literal| self.atom_db.level_of(literal.atom()) == Some(max_level))
            .count();

        let target: LevelIndex = match at_max {
            1 => {
                // Asserting at the second highest level.
                formula
                    .iter()
                    .filter_map(|literal| self.atom_db.level_of(literal.atom()))
                    .filter(|level| *level < max_level)
                    .max()
                    .unwrap_or(0)
            }
            _ => max_level - 1,
        };

        self.backjump(target);

        // With the backjump made the formula is asserting or unresolved, and
        // either way propagation takes over once stored.
        let mut formula = formula;
        match formula.len() {
            1 => {
                self.atom_db
                    .value_and_record(&mut self.trail, formula[0], AssignmentSource::Unit);
            }

            2 => {
                let first = formula[0];
                let other = formula[1];
                self.watches.watch_binary(first, other);
                self.watches.watch_binary(other, first);

                if let Some(asserted) = self.first_unvalued(&formula) {
                    let false_other = if asserted == first { other } else { first };
                    self.atom_db.value_and_record(
                        &mut self.trail,
                        asserted,
                        AssignmentSource::BCP(Reason::Binary(false_other)),
                    );
                }
            }

            _ => {
                // Order any unvalued literal first so a propagation through
                // the formula keeps the implicant invariant.
                if let Some(asserted) = self.first_unvalued(&formula) {
                    let position = formula
                        .iter()
                        .position(|literal| *literal == asserted)
                        .expect("asserted literal lost");
                    formula.swap(0, position);
                }
                self.place_max_level_second(&mut formula);

                let asserting = self.first_unvalued(&formula).is_some()
                    && formula
                        .iter()
                        .filter(|literal| self.atom_db.value_of(literal.atom()).is_none())
                        .count()
                        == 1;

                let key = self.clause_db.store(
                    formula,
                    ClauseSource::LoopFormula,
                    &mut self.watches,
                )?;

                if asserting {
                    let asserted = *unsafe { self.clause_db.get(&key)?.get_unchecked(0) };
                    self.atom_db.value_and_record(
                        &mut self.trail,
                        asserted,
                        AssignmentSource::BCP(Reason::LoopFormula(key)),
                    );
                }
            }
        }

        self.queue_all_components();
        Ok(true)
    }

    /// The first literal of the clause without a value, if any.
    fn first_unvalued(&self, clause: &CClause) -> Option<crate::structures::literal::CLiteral> {
        clause
            .iter()
            .find(|literal| self.atom_db.value_of(literal.atom()).is_none())
            .copied()
    }

    /// Swaps a maximum-level literal into position 1, leaving position 0
    /// untouched.
    fn place_max_level_second(&self, clause: &mut CClause) {
        let mut max_index = 1;
        let mut max_level = self.atom_db.level_of(clause[1].atom());
        for index in 2..clause.len() {
            let level = self.atom_db.level_of(clause[index].atom());
            if level > max_level {
                max_index = index;
                max_level = level;
            }
        }
        clause.swap(1, max_index);
    }
}
