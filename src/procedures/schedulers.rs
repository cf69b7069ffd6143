/*!
Restart and deletion scheduling.

The restart controller is consulted after every conflict, with two policies:

- **Sequence driven**: restart when the count of conflicts since the last
  restart reaches the current element of the luby sequence scaled by the
  configured `u` constant, then advance the sequence.
- **Block-distance driven**: keep bounded windows of recent learned-clause
  block distances and of recent trail lengths.
  Restart when the window average scaled by `k` exceeds the running mean
  block distance, and *block* restarts --- by flushing the window --- while
  the trail runs unusually long relative to its own window, as a long trail
  suggests progress towards a model.

On restart: backjump to the lowest decision level, flush the block-distance
window, import any shared clauses, and run a level-zero simplification pass.

Deletion is checked after every conflict as well, with the policy and its
trigger owned by the [clause database](crate::db::clause).
*/

use crate::{config::RestartPolicy, context::GenericContext, misc::log::targets};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Notes a conflict to the restart controller: samples the trail length
    /// and applies the blocking rule.
    pub(crate) fn note_conflict_for_restarts(&mut self) {
        if let RestartPolicy::BlockDistance = self.config.restart_policy {
            let trail_length = self.trail.assignment_count() as u64;
            self.counters.trail_window.push(trail_length);

            if self.counters.total_conflicts > self.config.bd_restarts.blocking_delay
                && self.counters.lbd_window.is_valid()
                && trail_length as f64
                    > self.config.bd_restarts.r * self.counters.trail_window.average()
            {
                self.counters.lbd_window.clear();
            }
        }
    }

    /// True if the restart policy calls for a restart.
    pub fn restart_due(&self) -> bool {
        if !self.config.restarts.value {
            return false;
        }

        match self.config.restart_policy {
            RestartPolicy::Luby => {
                self.counters.fresh_conflicts
                    >= self
                        .counters
                        .luby
                        .current()
                        .saturating_mul(self.config.luby_u.value)
            }

            RestartPolicy::BlockDistance => {
                self.counters.lbd_window.is_valid()
                    && self.counters.lbd_window.average() * self.config.bd_restarts.k
                        > self.counters.sum_lbd / self.counters.total_conflicts as f64
            }
        }
    }

    /// Performs a restart: backjump to the lowest decision level, flush the
    /// windows, import shared clauses, and simplify at level zero.
    pub fn restart(&mut self) {
        log::info!(target: targets::BACKJUMP, "Restart {} after {} conflicts.", self.counters.total_restarts, self.counters.fresh_conflicts);

        self.backjump(self.trail.lowest_decision_level());

        if let RestartPolicy::Luby = self.config.restart_policy {
            self.counters.luby.next();
        }

        self.counters.lbd_window.clear();
        self.counters.fresh_conflicts = 0;
        self.counters.total_restarts += 1;
        self.counters.fresh_restarts += 1;

        self.import_shared_clauses();
        self.simplify_at_level_zero();
    }

    /// Reduces the addition clauses if the deletion policy calls for it.
    pub fn reduce_if_due(&mut self) {
        if self
            .clause_db
            .reduction_due(self.trail.assignment_count(), self.counters.total_conflicts)
        {
            log::debug!(target: targets::REDUCTION, "Reduction after {} conflicts.", self.counters.total_conflicts);
            self.clause_db.reduce(&self.atom_db, &mut self.watches);
            self.clause_db.grow_deletion_threshold();
        }
    }
}
