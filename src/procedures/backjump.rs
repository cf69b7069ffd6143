/*!
Recovery from a conflict.

A backjump is a 'jump' from some (higher) decision level to some previous
(lower) decision level.

Typically, a backjump is made from level *l* to level *l - i* because a
conflict was found at level *l* and analysis produced a clause which asserts
some literal at level *l - i*.
In this case, all decisions and all consequences of those decisions from
level *l* down to level *l - i* are undone: each atom is unassigned (with its
phase saved and its activity restored to the heap), the propagation cursor is
clamped, and any aggregate counter updates applied above the target level are
rewound through the per-level registry.

The backjump level of an asserting clause is the maximum decision level among
its literals past the first --- see
[asserting_backjump_level](GenericContext::asserting_backjump_level).
*/

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets,
    structures::{clause::Clause, literal::Literal},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// Passing a target at or above the current level is safe --- nothing
    /// happens.
    pub fn backjump(&mut self, target: LevelIndex) {
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}.", self.trail.level());

        while self.trail.level() > target {
            for literal in self.trail.forget_top_level() {
                self.atom_db.drop_value(literal.atom());
            }
        }

        self.propagators.rewind_to(target);
    }

    /// The backjump level of an asserting clause whose asserted literal is at
    /// position 0: the maximum decision level among the remaining literals,
    /// or the lowest decision level for a unit clause.
    pub fn asserting_backjump_level(&self, clause: &impl Clause) -> LevelIndex {
        let mut level = self.trail.lowest_decision_level();

        for literal in clause.literals().skip(1) {
            if let Some(literal_level) = self.atom_db.level_of(literal.atom()) {
                if literal_level > level {
                    level = literal_level;
                }
            }
        }

        level
    }

    /// Resets all decisions and the consequences of those decisions.
    ///
    /// In other words, backjumps to before any decision was made.
    /// Note, this does not clear any assumptions made.
    pub fn clear_decisions(&mut self) {
        self.backjump(self.trail.lowest_decision_level());
        if matches!(
            self.state,
            crate::context::ContextState::Coherent
                | crate::context::ContextState::Incoherent(
                    crate::context::IncoherenceOrigin::Assumptions
                )
        ) {
            self.state = crate::context::ContextState::Input;
        }
    }

    /// Removes the assumptions of the present solve, unbinding the value of
    /// any atom bound above level zero and clearing assumption flags.
    pub fn clear_assumptions(&mut self) {
        self.trail.initial_decision_level = 0;
        self.backjump(0);

        let assumptions = std::mem::take(&mut self.assumptions);
        for assumption in &assumptions {
            self.atom_db.flags_mut(assumption.atom()).assumption = false;
        }
    }
}
