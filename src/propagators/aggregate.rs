/*!
Pseudo-Boolean aggregates: a bound on the weighted sum of true literals.

An aggregate records literals with (unsigned) weights and a bound, and is
satisfied when the sum of the weights of its true literals is at most the
bound.

# Propagation

Propagation is counter based.
The aggregate keeps the weight of its true literals, updated as subscribed
literals become true.
With *slack* the bound less the true weight:

- If the slack is negative, the aggregate conflicts with the current
  valuation.
- Otherwise, any unvalued literal whose weight exceeds the slack must be
  false.

Each counter update is recorded with the decision level it was made at, so a
backjump rewinds exactly the updates applied above the target level.

# Reasons

The reason for a propagation (or conflict) is the set of true literals of the
aggregate at the time, reconstructed on demand by filtering members on their
trail position.
*/

use crate::{
    db::{atom::AtomDB, LevelIndex},
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
    },
};

/// A weighted literal of an aggregate.
#[derive(Clone, Copy)]
pub struct AggregateMember {
    /// The literal.
    pub literal: CLiteral,

    /// The weight of the literal.
    pub weight: u64,
}

/// A bound on the weighted sum of true literals.
pub struct Aggregate {
    /// The members of the aggregate.
    members: Vec<AggregateMember>,

    /// The bound: the weighted sum of true members may not exceed this.
    bound: u64,

    /// The weight of members true on the current valuation.
    true_weight: u64,

    /// Counter updates, as member index and the level the update was applied
    /// at, in application order.
    applied: Vec<(u32, LevelIndex)>,
}

impl Aggregate {
    /// An aggregate over `members` bounded by `bound`, with no member true.
    pub fn new(members: Vec<AggregateMember>, bound: u64) -> Self {
        Aggregate {
            members,
            bound,
            true_weight: 0,
            applied: Vec::default(),
        }
    }

    /// The members of the aggregate.
    pub fn members(&self) -> &[AggregateMember] {
        &self.members
    }

    /// The bound of the aggregate.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// The weight of members true on the current valuation.
    pub fn true_weight(&self) -> u64 {
        self.true_weight
    }

    /// The bound less the true weight, or None if the bound is exceeded.
    pub fn slack(&self) -> Option<u64> {
        self.bound.checked_sub(self.true_weight)
    }

    /// Applies the counter update for the member at `index` becoming true.
    pub fn apply(&mut self, index: u32, level: LevelIndex) {
        self.true_weight = self
            .true_weight
            .saturating_add(self.members[index as usize].weight);
        self.applied.push((index, level));
    }

    /// Rewinds counter updates applied above `level`.
    pub fn rewind_to(&mut self, level: LevelIndex) {
        while let Some((index, update_level)) = self.applied.last() {
            if *update_level > level {
                self.true_weight = self
                    .true_weight
                    .saturating_sub(self.members[*index as usize].weight);
                self.applied.pop();
            } else {
                break;
            }
        }
    }

    /// The members forced false by the current slack: unvalued members whose
    /// weight exceeds the slack.
    ///
    /// Meaningful only when the slack is non-negative.
    pub fn forced_members<'a>(
        &'a self,
        atom_db: &'a AtomDB,
    ) -> impl Iterator<Item = CLiteral> + 'a {
        let slack = self.slack().unwrap_or(0);
        self.members.iter().filter_map(move |member| {
            match atom_db.value_of(member.literal.atom()) {
                None if member.weight > slack => Some(member.literal.negate()),
                _ => None,
            }
        })
    }

    /// The clause implied for `literal` by the true members of the aggregate
    /// at trail position `trail_length`: the literal together with the
    /// negations of the contributing members.
    ///
    /// For a conflict, `literal` is None and the clause contains only the
    /// negations.
    pub fn explanation(
        &self,
        literal: Option<CLiteral>,
        trail_length: usize,
        atom_db: &AtomDB,
    ) -> CClause {
        let mut clause = CClause::default();
        if let Some(literal) = literal {
            clause.push(literal);
        }

        for member in &self.members {
            let atom = member.literal.atom();
            if atom_db
                .value_of(atom)
                .is_some_and(|value| value == member.literal.polarity())
                && atom_db.position_of(atom) < trail_length
            {
                clause.push(member.literal.negate());
            }
        }

        clause
    }
}
