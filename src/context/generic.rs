use crossbeam::channel::{Receiver, Sender};

use crate::{
    config::Config,
    context::callbacks::Callbacks,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches},
    optimization::OptimizationDB,
    propagators::PropagatorDB,
    reports::Report,
    structures::{
        atom::Atom,
        clause::CClause,
        consequence::Reason,
        literal::{CLiteral, Literal},
    },
};

use super::{ContextState, Counters, IncoherenceOrigin};

/// A conflict noted during propagation or input, pending analysis.
///
/// The reason is absent when the conflict arose from a direct contradiction
/// --- an empty clause, or a falsified assumption --- rather than through
/// propagation.
#[derive(Clone, Copy, Debug)]
pub struct Conflict {
    /// A literal false on the current valuation.
    pub literal: CLiteral,

    /// The reason the literal must be true, if the conflict arose through
    /// propagation.
    pub reason: Option<Reason>,
}

/// A generic context, parameterised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements
/// [Default](std::default::Default) --- the default is used to appease the
/// borrow checker in calls which take ownership of the rng for the duration
/// of a borrow of the context.
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to the context and solves.
    pub counters: Counters,

    /// The atom database. See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database. See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The watch database. See [db::watches](crate::db::watches) for details.
    pub watches: Watches,

    /// The trail. See [db::trail](crate::db::trail) for details.
    pub trail: Trail,

    /// Aggregates, components, and the dependency graph.
    /// See [propagators](crate::propagators) for details.
    pub propagators: PropagatorDB,

    /// Soft literals and their levels.
    /// See [optimization](crate::optimization) for details.
    pub optimization: OptimizationDB,

    /// The status of the context.
    pub state: ContextState,

    /// A noted conflict, pending analysis or core extraction.
    pub conflict: Option<Conflict>,

    /// The assumptions of the present solve, in assertion order.
    pub assumptions: Vec<CLiteral>,

    /// The unsat core of the latest incoherent solve under assumptions, in
    /// clause form.
    pub(crate) core: Vec<CLiteral>,

    /// Literals preferred by the decision heuristic, consulted before the
    /// activity heap in injection order. Injected by the optimization driver.
    pub preferred: std::collections::VecDeque<CLiteral>,

    /// The source of rng.
    pub rng: R,

    /// Callbacks made at notable points of a solve.
    pub callbacks: Callbacks,

    /// A channel of clauses to import at restarts, if attached.
    pub import_channel: Option<Receiver<CClause>>,

    /// A channel on which to publish learned clauses, if attached.
    pub export_channel: Option<Sender<CClause>>,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A context from a config, with randomness from `R`.
    pub fn with_rng(config: Config, rng: R) -> Self {
        let mut context = GenericContext {
            counters: Counters::new(config.bd_restarts.lbd_window, config.bd_restarts.trail_window),
            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(&config),
            watches: Watches::default(),
            trail: Trail::default(),
            propagators: PropagatorDB::default(),
            optimization: OptimizationDB::default(),
            state: ContextState::Configuration,
            conflict: None,
            assumptions: Vec::default(),
            core: Vec::default(),
            preferred: std::collections::VecDeque::default(),
            rng,
            callbacks: Callbacks::default(),
            import_channel: None,
            export_channel: None,
            config,
        };

        // Watches for the top atom, created with the atom database.
        context.watches.fresh_atom();
        context
    }

    /// The report of the context on the satisfiability of its formula.
    pub fn report(&self) -> Report {
        match self.state {
            ContextState::Coherent => Report::Coherent,
            ContextState::Incoherent(_) => Report::Incoherent,
            _ => Report::Unknown,
        }
    }

    /// The value of the atom on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// Notes a conflict, discarding pending post-propagator work.
    pub fn note_conflict(&mut self, literal: CLiteral, reason: Option<Reason>) {
        self.conflict = Some(Conflict { literal, reason });
        self.propagators.reset_pending();
    }

    /// True if a conflict is noted.
    pub fn conflict_noted(&self) -> bool {
        self.conflict.is_some()
    }

    /// Clears the noted conflict and any pending post-propagator work.
    pub fn clear_conflict(&mut self) {
        self.conflict = None;
        self.propagators.reset_pending();
    }

    /// Notes that the formula of the context is incoherent, independent of
    /// any assumption.
    pub fn note_fundamental_incoherence(&mut self) {
        self.state = ContextState::Incoherent(IncoherenceOrigin::Fundamental);
        self.make_callback_incoherence();
    }

    /// Notes that the formula of the context is incoherent under the present
    /// assumptions.
    pub fn note_assumption_incoherence(&mut self) {
        self.state = ContextState::Incoherent(IncoherenceOrigin::Assumptions);
        self.make_callback_incoherence();
    }

    /// Attaches a channel of clauses to import at restarts.
    pub fn set_import_channel(&mut self, receiver: Receiver<CClause>) {
        self.import_channel = Some(receiver);
    }

    /// Attaches a channel on which to publish learned clauses.
    pub fn set_export_channel(&mut self, sender: Sender<CClause>) {
        self.export_channel = Some(sender);
    }

    /// Injects literals to be preferred by the decision heuristic, consulted
    /// before the activity heap in the given order.
    pub fn inject_preferred(&mut self, literals: impl Iterator<Item = CLiteral>) {
        self.preferred.extend(literals);
    }

    /// Flushes any injected preferred literals.
    pub fn flush_preferred(&mut self) {
        self.preferred.clear();
    }

    /// The next undefined preferred literal, if any.
    pub(crate) fn pop_preferred(&mut self) -> Option<CLiteral> {
        while let Some(literal) = self.preferred.pop_front() {
            if self.atom_db.value_of(literal.atom()).is_none() {
                return Some(literal);
            }
        }
        None
    }
}

impl crate::context::Context {
    /// A context from a config, with the canonical source of randomness.
    pub fn from_config(config: Config) -> Self {
        Self::with_rng(config, crate::generic::minimal_pcg::MinimalPCG32::default())
    }
}
