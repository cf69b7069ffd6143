/*!
The optimization driver: lexicographic, model-guided bound tightening.

The driver sits above the solver and iteratively narrows the cost of models,
level by level, most significant level first:

1. Soft literals already true at level zero are simplified away, with their
   weights accumulated into the precomputed cost of the level, and the
   negations of the remaining soft literals are injected as preferred
   decisions.
2. The solver is called.
   On a model, the cost of the level is computed and reported, and a bound
   constraint is added requiring a strictly better cost; on incoherence, the
   previous model was optimal for the level.
3. An optimal level is *frozen* --- a hard aggregate holds the level at its
   optimum --- and the driver proceeds to the next level.

# Bound constraints

Bounds are enforced through [aggregates](crate::propagators::aggregate),
conditioned on a fresh selector atom so a failed bound does not poison the
formula: with `M` the total soft weight of the level, the constraint

> M·\[b\] + Σ wᵢ·\[litᵢ\] ≤ (cost − 1) + M

is vacuous while `b` is free and enforces `Σ ≤ cost − 1` when `b` is assumed.
Each solve assumes the current selector; incoherence under the selector
establishes the optimum.

# Budgets

Budget exhaustion surfaces as
[Unknown](crate::reports::OptimizeReport::Unknown), carrying the best cost
found for each level a model was found on; the context remains usable.
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets,
    reports::{OptimizeReport, Report},
    structures::literal::{CLiteral, Literal},
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Finds a model minimizing the lexicographic cost vector of the
    /// registered soft literals.
    ///
    /// On [Optimum](OptimizeReport::Optimum) the valuation of the context
    /// holds an optimal model.
    pub fn optimize(&mut self) -> Result<OptimizeReport, ErrorKind> {
        let mut frozen_costs: Vec<u64> = Vec::default();

        // An initial solve establishes coherence of the hard fragment.
        match self.solve()? {
            Report::Coherent => {}
            Report::Incoherent => {
                return Ok(OptimizeReport::Incoherent);
            }
            Report::Unknown => return Ok(OptimizeReport::Unknown(frozen_costs)),
        }

        for level in 0..self.optimization.level_count() {
            match self.optimize_level(level)? {
                LevelOutcome::Optimum(cost) => {
                    log::info!(target: targets::OPTIMIZATION, "Level {level} optimal at {cost}.");
                    frozen_costs.push(cost);
                }

                LevelOutcome::Unknown => {
                    self.make_callback_cost(&frozen_costs);
                    return Ok(OptimizeReport::Unknown(frozen_costs));
                }
            }
        }

        self.flush_preferred();
        self.make_callback_optimum(&frozen_costs);
        Ok(OptimizeReport::Optimum(frozen_costs))
    }

    /// Minimizes the cost of a single level, freezing the optimum.
    fn optimize_level(&mut self, level: usize) -> Result<LevelOutcome, ErrorKind> {
        // The context holds a model; simplification applies only to values
        // proven at level zero, so decisions are cleared first.
        self.clear_decisions();
        self.optimization
            .simplify_at_level_zero(level, &self.atom_db);

        let soft_weight: u64 = self
            .optimization
            .literals(level)
            .iter()
            .filter(|soft| !soft.removed && !soft.aux)
            .fold(0_u64, |total, soft| total.saturating_add(soft.weight));

        let mut best_cost: Option<u64> = None;

        loop {
            self.prefer_optimization_literals(level);

            let assumptions = match best_cost {
                None => Vec::default(),
                Some(cost) => {
                    let precomputed = self.optimization.precomputed(level);
                    let soft_cost = cost.saturating_sub(precomputed);

                    if soft_cost == 0 {
                        // Nothing above the floor: the level is optimal.
                        return self.freeze_level(level, cost);
                    }

                    let selector = self.bound_selector(level, soft_cost - 1, soft_weight)?;
                    vec![selector]
                }
            };

            let report = match assumptions.is_empty() {
                true => self.solve()?,
                false => self.solve_given(assumptions)?,
            };

            match report {
                Report::Coherent => {
                    let cost = self.optimization.cost_of_model(level, &self.atom_db);
                    let costs = self.optimization.cost_vector(&self.atom_db);
                    self.make_callback_cost(&costs);

                    log::info!(target: targets::OPTIMIZATION, "Level {level} model of cost {cost}.");

                    best_cost = Some(cost);

                    // Back to level zero, with the selector assumption (if
                    // any) released, so a fresh bound may be attached.
                    self.clear_assumptions();
                    self.clear_conflict();
                    self.state = ContextState::Input;
                }

                Report::Incoherent => {
                    let best = match best_cost {
                        Some(best) => best,
                        // The initial solve was coherent, so the first
                        // iteration cannot be incoherent.
                        None => return Err(ErrorKind::InvalidState),
                    };

                    return self.freeze_level(level, best);
                }

                Report::Unknown => return Ok(LevelOutcome::Unknown),
            }
        }
    }

    /// Freezes a level at its optimum with a hard aggregate and re-solves to
    /// restore a model, leaving the context coherent for the next level.
    fn freeze_level(&mut self, level: usize, cost: u64) -> Result<LevelOutcome, ErrorKind> {
        // Reset any incoherence-under-assumptions from the bound probe.
        self.clear_assumptions();
        self.clear_conflict();
        self.state = ContextState::Input;

        let precomputed = self.optimization.precomputed(level);
        let members: Vec<(CLiteral, u64)> = self
            .optimization
            .literals(level)
            .iter()
            .filter(|soft| !soft.removed && !soft.aux)
            .map(|soft| (soft.literal, soft.weight))
            .collect();

        if !members.is_empty() {
            self.add_aggregate(members, cost.saturating_sub(precomputed))?;
        }

        // Restore a model respecting every frozen level.
        match self.solve()? {
            Report::Coherent => Ok(LevelOutcome::Optimum(cost)),
            // The frozen bound is witnessed by the best model.
            Report::Incoherent => Err(ErrorKind::InvalidState),
            Report::Unknown => Ok(LevelOutcome::Unknown),
        }
    }

    /// A fresh selector atom guarding the bound `Σ soft ≤ bound` for a level.
    fn bound_selector(
        &mut self,
        level: usize,
        bound: u64,
        soft_weight: u64,
    ) -> Result<CLiteral, ErrorKind> {
        let selector_atom = self.fresh_atom_runtime()?;
        let selector = CLiteral::new(selector_atom, true);

        // The selector weight dominates the sum, so the constraint is
        // vacuous unless the selector is true.
        let dominating = soft_weight.max(1);

        let mut members: Vec<(CLiteral, u64)> = vec![(selector, dominating)];
        members.extend(
            self.optimization
                .literals(level)
                .iter()
                .filter(|soft| !soft.removed && !soft.aux)
                .map(|soft| (soft.literal, soft.weight)),
        );

        self.add_aggregate(members, bound.saturating_add(dominating))?;

        Ok(selector)
    }
}

/// The outcome of minimizing a single level.
enum LevelOutcome {
    /// The level is optimal at the given cost, and frozen.
    Optimum(u64),

    /// A budget was exhausted.
    Unknown,
}
