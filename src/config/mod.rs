/*!
Configuration of a context.

All configuration for a context is contained in [Config].
Some structures clone parts of the configuration when created --- notably the
databases, whose local configuration lives in [dbs].

Scalar options carry their permitted range as a [ConfigOption]; structural
choices (policies, variants) are plain enums.
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod dbs;
pub use dbs::{AtomDBConfig, ClauseDBConfig};

mod vsids;
pub use vsids::VSIDS;

mod restarts;
pub use restarts::{BlockDistanceRestartConfig, RestartPolicy};

mod deletion;
pub use deletion::DeletionPolicy;

use crate::generic::luby::LubyRepresentation;

/// The representation of activity.
pub type Activity = f64;

/// The representation of a literal block distance.
pub type LBD = u16;

/// The probability of choosing a positive polarity for a fresh decision.
pub type PolarityLean = f64;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Configuration of the atom database.
    pub atom_db: AtomDBConfig,

    /// Configuration of the clause database.
    pub clause_db: ClauseDBConfig,

    /// Which restart policy the solve follows.
    pub restart_policy: RestartPolicy,

    /// Parameters of the block-distance restart policy.
    pub bd_restarts: BlockDistanceRestartConfig,

    /// The `u` value to multiply the luby sequence by when determining
    /// whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The probability of assigning positive polarity to an atom when freely
    /// choosing a value for the atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of making a random decision in place of an activity
    /// driven decision.
    pub random_decision_bias: ConfigOption<PolarityLean>,

    /// Default to the last set value of an atom when choosing a value for the
    /// atom, otherwise decide with the polarity lean.
    pub phase_saving: ConfigOption<bool>,

    /// Permit (scheduled) restarts.
    pub restarts: ConfigOption<bool>,

    /// Remove literals from a learned clause by self-subsumption.
    pub minimization: ConfigOption<bool>,

    /// Remove literals from a low block-distance learned clause by resolution
    /// against binary implications of the asserted literal.
    pub binary_minimization: ConfigOption<bool>,

    /// Which VSIDS variant to use during resolution based analysis.
    pub vsids_variant: ConfigOption<VSIDS>,

    /// Publish learned clauses at or under this size on the transfer channel,
    /// when a channel is attached. Zero disables publication.
    pub transfer_size_bound: ConfigOption<usize>,

    /// The maximum number of decisions per solve. Zero for no limit.
    pub decision_limit: ConfigOption<usize>,

    /// The maximum number of restarts per solve. Zero for no limit.
    pub restart_limit: ConfigOption<usize>,

    /// The time limit per solve. Zero for no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// Iteratively shrink unsat cores by re-solving until a fixpoint.
    pub minimize_cores: ConfigOption<bool>,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick,
    /// deterministic results on a library of tests.
    fn default() -> Self {
        Config {
            atom_db: AtomDBConfig::default(),
            clause_db: ClauseDBConfig::default(),

            restart_policy: RestartPolicy::BlockDistance,
            bd_restarts: BlockDistanceRestartConfig::default(),

            luby_u: ConfigOption {
                name: "luby_u",
                min: LubyRepresentation::MIN,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            restarts: ConfigOption {
                name: "restarts",
                min: false,
                max: true,
                value: true,
            },

            minimization: ConfigOption {
                name: "minimization",
                min: false,
                max: true,
                value: true,
            },

            binary_minimization: ConfigOption {
                name: "binary_minimization",
                min: false,
                max: true,
                value: true,
            },

            vsids_variant: ConfigOption {
                name: "vsids",
                min: VSIDS::Chaff,
                max: VSIDS::MiniSAT,
                value: VSIDS::MiniSAT,
            },

            transfer_size_bound: ConfigOption {
                name: "transfer_size_bound",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            decision_limit: ConfigOption {
                name: "decision_limit",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            restart_limit: ConfigOption {
                name: "restart_limit",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },

            minimize_cores: ConfigOption {
                name: "minimize_cores",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}
