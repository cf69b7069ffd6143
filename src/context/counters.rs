use std::time::Duration;

use crate::generic::{bounded_queue::BoundedQueue, luby::Luby};

/// Counts for various things which count, roughly.
pub struct Counters {
    /// A count of every conflict seen during a solve.
    pub total_conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with the luby
    /// sequence.
    pub fresh_conflicts: u32,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// A count of decisions made during the present solve, for the decision
    /// budget.
    pub fresh_decisions: usize,

    /// The total number of iterations through a solve.
    pub total_iterations: usize,

    /// The number of restarts, ever.
    pub total_restarts: usize,

    /// The number of restarts during the present solve, for the restart
    /// budget.
    pub fresh_restarts: usize,

    /// The time taken during the present solve.
    pub time: Duration,

    /// The current element of the luby sequence.
    pub luby: Luby,

    /// A bounded window of the block distances of recent learned clauses.
    pub lbd_window: BoundedQueue,

    /// A bounded window of recent trail lengths, sampled per conflict.
    pub trail_window: BoundedQueue,

    /// The sum of every learned clause block distance, for the running mean.
    pub sum_lbd: f64,
}

impl Counters {
    pub fn new(lbd_window: usize, trail_window: usize) -> Self {
        Counters {
            total_conflicts: 0,
            fresh_conflicts: 0,
            total_decisions: 0,
            fresh_decisions: 0,
            total_iterations: 0,
            total_restarts: 0,
            fresh_restarts: 0,
            time: Duration::from_secs(0),
            luby: Luby::default(),
            lbd_window: BoundedQueue::new(lbd_window),
            trail_window: BoundedQueue::new(trail_window),
            sum_lbd: 0.0,
        }
    }
}
