/*!
Level-zero simplification.

Run after a restart and after a unit clause is learned, when the trail is at
(or below) the lowest decision level:

- Addition clauses satisfied at level zero are detached and removed.
- Literals falsified at level zero are removed from the tails of remaining
  clauses, leaving watched positions untouched.
- Binary implications already satisfied at level zero are dropped from the
  implication lists.
- Soft literals valued true at level zero may be simplified separately ---
  see [OptimizationDB::simplify_at_level_zero](crate::optimization::OptimizationDB::simplify_at_level_zero).

Each removal is sound only at level zero, where values are permanent.
*/

use crate::{context::GenericContext, structures::literal::Literal};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Simplifies the clause database against level-zero values.
    ///
    /// A no-op unless the trail is at level zero with no assignment pending
    /// propagation.
    pub fn simplify_at_level_zero(&mut self) {
        if self.trail.level() != 0 || self.trail.has_next_to_propagate() {
            return;
        }

        self.clause_db
            .simplify_at_level_zero(&self.atom_db, &mut self.watches);

        let atom_db = &self.atom_db;
        self.watches.shrink_binary_lists(|literal| {
            atom_db
                .value_of(literal.atom())
                .is_some_and(|value| value == literal.polarity())
        });
    }
}
