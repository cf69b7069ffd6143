/*!
Weighted soft literals, partitioned into lexicographic priority levels.

An optimization literal pairs a literal with an (unsigned) weight and a
priority level; level 0 is the most significant.
The cost of a model at a level is the precomputed cost of the level plus the
weights of the non-auxiliary soft literals true on the model; cost sums
saturate rather than wrap.

Auxiliary literals are relaxation literals introduced by core-guided
algorithms; they are skipped during cost computation.

Soft literals true at level zero may be removed, with their weight
accumulated into the precomputed cost of the level --- see
[simplify_at_level_zero](OptimizationDB::simplify_at_level_zero).

The [driver](crate::optimization::driver) sits above the solver and narrows
bounds per level.
*/

pub mod driver;

use crate::{
    db::atom::AtomDB,
    structures::literal::{CLiteral, Literal},
    types::err::BuildError,
};

/// A soft literal: a literal with a weight and a priority level.
#[derive(Clone, Copy)]
pub struct OptimizationLiteral {
    /// The literal whose truth is penalised.
    pub literal: CLiteral,

    /// The penalty for the literal being true on a model.
    pub weight: u64,

    /// Whether the literal has been removed, e.g. by simplification.
    pub removed: bool,

    /// Whether the literal is auxiliary, and so skipped in cost computation.
    pub aux: bool,
}

/// The store of soft literals, partitioned by priority level.
#[derive(Default)]
pub struct OptimizationDB {
    /// Soft literals, by level.
    levels: Vec<Vec<OptimizationLiteral>>,

    /// Cost accumulated from soft literals removed at level zero, by level.
    precomputed: Vec<u64>,

    /// Whether some soft literal of the level carries a weight above one.
    weighted: Vec<bool>,
}

impl OptimizationDB {
    /// Sizes the per-level stores. To be called before soft literals are
    /// added.
    pub fn set_levels(&mut self, count: usize) {
        while self.levels.len() < count {
            self.levels.push(Vec::default());
            self.precomputed.push(0);
            self.weighted.push(false);
        }
    }

    /// The count of priority levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// True if some soft literal has been registered.
    pub fn is_optimization_problem(&self) -> bool {
        self.levels.iter().any(|level| !level.is_empty())
    }

    /// Registers a soft literal at a level.
    pub fn add(
        &mut self,
        literal: CLiteral,
        weight: u64,
        level: usize,
        aux: bool,
    ) -> Result<(), BuildError> {
        if level >= self.levels.len() {
            return Err(BuildError::MissingLevel);
        }

        self.levels[level].push(OptimizationLiteral {
            literal,
            weight,
            removed: false,
            aux,
        });

        if weight > 1 {
            self.weighted[level] = true;
        }

        Ok(())
    }

    /// The soft literals of a level.
    pub fn literals(&self, level: usize) -> &[OptimizationLiteral] {
        &self.levels[level]
    }

    /// The precomputed cost of a level.
    pub fn precomputed(&self, level: usize) -> u64 {
        self.precomputed[level]
    }

    /// True if some soft literal of the level carries a weight above one.
    pub fn is_weighted(&self, level: usize) -> bool {
        self.weighted[level]
    }

    /// The cost of the current (complete) valuation at a level.
    pub fn cost_of_model(&self, level: usize, atom_db: &AtomDB) -> u64 {
        let mut cost = self.precomputed[level];
        for soft in &self.levels[level] {
            if soft.removed || soft.aux {
                continue;
            }
            if atom_db
                .value_of(soft.literal.atom())
                .is_some_and(|value| value == soft.literal.polarity())
            {
                cost = cost.saturating_add(soft.weight);
            }
        }
        cost
    }

    /// The cost of the current (complete) valuation at every level.
    pub fn cost_vector(&self, atom_db: &AtomDB) -> Vec<u64> {
        (0..self.levels.len())
            .map(|level| self.cost_of_model(level, atom_db))
            .collect()
    }

    /// Removes soft literals true at level zero, accumulating their weights
    /// into the precomputed cost of the level. Returns the precomputed cost.
    ///
    /// Sound only at level zero.
    pub fn simplify_at_level_zero(&mut self, level: usize, atom_db: &AtomDB) -> u64 {
        let mut accumulated = self.precomputed[level];

        for soft in self.levels[level].iter_mut() {
            if soft.removed {
                continue;
            }
            if atom_db
                .value_of(soft.literal.atom())
                .is_some_and(|value| value == soft.literal.polarity())
            {
                soft.removed = true;
                if !soft.aux {
                    accumulated = accumulated.saturating_add(soft.weight);
                }
            }
        }

        self.precomputed[level] = accumulated;
        accumulated
    }
}
