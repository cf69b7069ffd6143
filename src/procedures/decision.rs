/*!
Choosing the value of an atom.

# Assumptions first

A solve under assumptions consumes the assumptions as its first decisions, in
order.
While the current level is below the count of assumptions, the assumption
indexed by the current level is examined:

- If the assumption has no value it is the next decision.
- If the assumption is true an (empty) level is opened and the next
  assumption is examined.
- If the assumption is false the solve is incoherent under the assumptions,
  and the falsified assumption seeds the unsat core.

# Heuristics

With assumptions exhausted, a free decision is made:

- Any injected preferred literal with an unvalued atom is decided first, in
  injection order.
- Otherwise, atoms are selected by activity: the atom database keeps atoms
  without a value on a max activity heap, and the most active unvalued atom
  is taken. (As the heap holds *at least* the unvalued atoms, valued atoms
  popped on the way are discarded.)
- With some (configurable) probability, a uniformly random unvalued atom is
  chosen in place of the activity heap.

The polarity of a free decision follows the saved phase of the atom, or a
(configurable) polarity lean when phase saving is disabled.
*/

use rand::{seq::IteratorRandom, Rng};

use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

/// Possible results of choosing a truth value to assign an atom.
pub enum DecisionOk {
    /// Some truth value was assigned to some atom, or an assumption was
    /// consumed.
    Made,

    /// All atoms have values: the valuation is complete.
    Exhausted,

    /// The given assumption is false on the current valuation.
    AssumptionFalsified(CLiteral),
}

/// Methods related to making decisions.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Makes a decision, consuming assumptions before consulting the
    /// heuristic.
    ///
    /// Opens a fresh decision level and records the decision on the trail,
    /// except when the valuation is complete or an assumption is falsified.
    pub fn make_decision(&mut self) -> DecisionOk {
        // Assumption phase.
        while (self.trail.level()) < self.trail.initial_decision_level {
            let assumption = self.assumptions[self.trail.level() as usize];

            match self.atom_db.value_of(assumption.atom()) {
                None => {
                    self.trail.push_fresh_level();
                    self.atom_db.value_and_record(
                        &mut self.trail,
                        assumption,
                        AssignmentSource::Assumption,
                    );
                    log::trace!("Assumed {assumption} at level {}.", self.trail.level());
                    return DecisionOk::Made;
                }

                Some(value) if value == assumption.polarity() => {
                    // The assumption already holds; the level is kept so
                    // levels and assumptions stay aligned.
                    self.trail.push_fresh_level();
                    continue;
                }

                Some(_) => {
                    log::trace!("The assumption {assumption} is false.");
                    return DecisionOk::AssumptionFalsified(assumption);
                }
            }
        }

        // Heuristic phase.
        if let Some(preferred) = self.pop_preferred() {
            self.counters.total_decisions += 1;
            self.counters.fresh_decisions += 1;

            self.trail.push_fresh_level();
            self.atom_db
                .value_and_record(&mut self.trail, preferred, AssignmentSource::Decision);
            log::trace!("Decided (preferred) {preferred}.");
            return DecisionOk::Made;
        }

        let mut rng = std::mem::take(&mut self.rng);
        let chosen_atom = self.atom_without_value(&mut rng);
        self.rng = rng;

        match chosen_atom {
            Some(atom) => {
                self.counters.total_decisions += 1;
                self.counters.fresh_decisions += 1;

                let decision = match self.config.phase_saving.value {
                    true => CLiteral::new(atom, self.atom_db.previous_value_of(atom)),
                    false => {
                        let random_value = self.rng.random_bool(self.config.polarity_lean.value);
                        CLiteral::new(atom, random_value)
                    }
                };

                self.trail.push_fresh_level();
                self.atom_db
                    .value_and_record(&mut self.trail, decision, AssignmentSource::Decision);
                log::trace!("Decided {decision} at level {}.", self.trail.level());
                DecisionOk::Made
            }

            None => DecisionOk::Exhausted,
        }
    }

    /// An atom without a value on the current valuation, by most activity or
    /// (sometimes) at random.
    fn atom_without_value(&mut self, rng: &mut impl Rng) -> Option<Atom> {
        match rng.random_bool(self.config.random_decision_bias.value) {
            true => self
                .atom_db
                .valuation()
                .unvalued_atoms()
                .filter(|atom| !self.atom_db.flags(*atom).eliminated)
                .choose(rng),

            false => {
                while let Some(atom) = self.atom_db.heap_pop_most_active() {
                    if self.atom_db.value_of(atom).is_none()
                        && !self.atom_db.flags(atom).eliminated
                    {
                        return Some(atom);
                    }
                }

                self.atom_db
                    .valuation()
                    .unvalued_atoms()
                    .find(|atom| !self.atom_db.flags(*atom).eliminated)
            }
        }
    }
}
