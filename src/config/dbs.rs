//! Configuration structures for the databases.
//!
//! Typically, these are cloned from the primary [Config](crate::config::Config)
//! when the relevant database is created.

use crate::config::{Activity, DeletionPolicy, LBD};

/// Configuration of the atom database.
#[derive(Clone, Debug)]
pub struct AtomDBConfig {
    /// The bump applied to the activity of an atom used during analysis.
    pub bump: Activity,

    /// The decay factor: after each conflict the bump is scaled by the
    /// reciprocal of this value.
    pub decay: Activity,

    /// The activity at which all activities and the bump are rescaled.
    pub max_activity: Activity,
}

impl Default for AtomDBConfig {
    fn default() -> Self {
        AtomDBConfig {
            bump: 1.0,
            decay: 0.95,
            max_activity: 1e100,
        }
    }
}

/// Configuration of the clause database.
#[derive(Clone, Debug)]
pub struct ClauseDBConfig {
    /// The decay factor for the clause activity bump.
    pub decay: Activity,

    /// The activity at which clause activities are rescaled.
    pub max_activity: Activity,

    /// Which deletion policy reductions follow.
    pub deletion: DeletionPolicy,

    /// A clause whose block distance improves while at or under this bound is
    /// promoted and survives reductions.
    pub lbd_frozen_bound: LBD,

    /// A learned clause with a block distance at or under this bound is a
    /// candidate for binary-resolution minimization.
    pub lbd_minimization_bound: LBD,

    /// The initial activity-policy threshold, as a factor of the count of
    /// original clauses.
    pub learned_size_factor: f64,

    /// The geometric growth of the activity-policy threshold.
    pub learned_size_increment: f64,

    /// The base count of addition clauses before a block-distance reduction.
    pub reduce_base: u32,

    /// The increment applied to the base after each reduction.
    pub reduce_increment: u32,

    /// A multiplier on the base, revised from the conflict count at each
    /// reduction.
    pub current_restart: u32,
}

impl Default for ClauseDBConfig {
    fn default() -> Self {
        ClauseDBConfig {
            decay: 0.999,
            max_activity: 1e100,
            deletion: DeletionPolicy::BlockDistance,
            lbd_frozen_bound: 30,
            lbd_minimization_bound: 6,
            learned_size_factor: 1.0 / 3.0,
            learned_size_increment: 1.1,
            reduce_base: 2000,
            reduce_increment: 300,
            current_restart: 1,
        }
    }
}
