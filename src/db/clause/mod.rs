/*!
A database of clause related things.

Records of clauses are distinguished by a mix of
[kind](crate::structures::clause) and/or
[source](crate::structures::clause::ClauseSource):

- Unit clauses are recorded on the trail as level-zero assignments.
- Binary clauses live in the [binary implication
  lists](crate::db::watches) and are reconstructed on demand.
- Long clauses are stored here, keyed by [ClauseKey].

Fields of the database are private to ensure the use of methods which may be
needed to uphold invariants.
*/

mod db_clause;
pub use db_clause::{DBClause, WatchStatus};

use crate::{
    config::{ClauseDBConfig, Config, DeletionPolicy},
    db::{
        keys::{ClauseKey, FormulaIndex, FormulaToken},
        watches::Watches,
        LevelIndex,
    },
    misc::log::targets,
    structures::{
        clause::{CClause, ClauseSource},
        consequence::{AssignmentSource, Reason},
        literal::{CLiteral, Literal},
    },
    types::err,
};

use super::atom::AtomDB;

/// A database of clause related things.
pub struct ClauseDB {
    /// Clause database specific configuration parameters.
    config: ClauseDBConfig,

    /// A count of stored addition clauses.
    // This can't be inferred from the addition vec, as indicies may be reused.
    addition_count: usize,

    /// A stack of keys for addition clauses whose indicies are empty.
    empty_keys: Vec<ClauseKey>,

    /// Original clauses.
    original: Vec<DBClause>,

    /// Addition clauses.
    addition: Vec<Option<DBClause>>,

    /// The bump applied to the activity of a used addition clause.
    bump: f64,

    /// The count of addition clauses above which a reduction is sought, for
    /// the activity-sorted deletion policy. Grows geometrically.
    pub max_learned: f64,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from
    /// `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            config: config.clause_db.clone(),
            addition_count: 0,
            empty_keys: Vec::default(),
            original: Vec::default(),
            addition: Vec::default(),
            bump: 1.0,
            max_learned: 0.0,
        }
    }

    /// The count of stored original clauses.
    pub fn original_count(&self) -> usize {
        self.original.len()
    }

    /// The count of stored addition clauses.
    pub fn addition_count(&self) -> usize {
        self.addition_count
    }

    /// The stored clause at `key`, if any.
    pub fn get(&self, key: &ClauseKey) -> Result<&DBClause, err::ClauseDBError> {
        match key {
            ClauseKey::Original(index) => self
                .original
                .get(*index as usize)
                .ok_or(err::ClauseDBError::Missing),

            ClauseKey::Addition(index, token) => match self.addition.get(*index as usize) {
                Some(Some(clause)) if clause.key() == &ClauseKey::Addition(*index, *token) => {
                    Ok(clause)
                }
                _ => Err(err::ClauseDBError::Missing),
            },
        }
    }

    /// Mutable access to the stored clause at `key`, if any.
    pub fn get_mut(&mut self, key: &ClauseKey) -> Result<&mut DBClause, err::ClauseDBError> {
        match key {
            ClauseKey::Original(index) => self
                .original
                .get_mut(*index as usize)
                .ok_or(err::ClauseDBError::Missing),

            ClauseKey::Addition(index, token) => match self.addition.get_mut(*index as usize) {
                Some(Some(clause)) if clause.key() == &ClauseKey::Addition(*index, *token) => {
                    Ok(clause)
                }
                _ => Err(err::ClauseDBError::Missing),
            },
        }
    }

    /// Stores a long clause with watches on its first two literals, returning
    /// its key.
    ///
    /// The first two literals of the clause become its watches as given, so
    /// the caller either orders the clause (fresh asserting clauses after a
    /// backjump) or re-initialises the watches afterwards (clauses added at
    /// level zero with falsified literals).
    pub fn store(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        watches: &mut Watches,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        match clause.len() {
            0 | 1 | 2 => Err(err::ClauseDBError::EmptyClause),

            _ => match source {
                ClauseSource::Original => {
                    let index = self.original.len() as FormulaIndex;
                    let key = ClauseKey::Original(index);
                    let db_clause = DBClause::from(key, clause);
                    db_clause.note_watches(watches);
                    self.original.push(db_clause);
                    Ok(key)
                }

                _ => {
                    let key = match self.empty_keys.pop() {
                        Some(key) => key.retoken()?,
                        None => {
                            if self.addition.len() == FormulaIndex::MAX as usize {
                                return Err(err::ClauseDBError::StorageExhausted);
                            }
                            self.addition.push(None);
                            ClauseKey::Addition(
                                (self.addition.len() - 1) as FormulaIndex,
                                FormulaToken::default(),
                            )
                        }
                    };

                    log::trace!(target: targets::CLAUSE_DB, "Addition stored at {key}.");

                    let db_clause = DBClause::from(key, clause);
                    db_clause.note_watches(watches);
                    self.addition[key.index()] = Some(db_clause);
                    self.addition_count += 1;
                    Ok(key)
                }
            },
        }
    }

    /// Re-initialises the watches of a stored clause with respect to the
    /// given valuation, releasing the watches noted on storage.
    ///
    /// For clauses stored with literals already falsified, e.g. at level zero
    /// or on import.
    pub fn rewatch(
        &mut self,
        key: ClauseKey,
        atom_db: &AtomDB,
        watches: &mut Watches,
    ) -> Result<(), err::ClauseDBError> {
        let clause = self.get(&key)?;
        watches.unwatch_long(unsafe { *clause.get_unchecked(0) }, key);
        watches.unwatch_long(unsafe { *clause.get_unchecked(1) }, key);

        let clause = self.get_mut(&key)?;
        clause.initialise_watches(
            atom_db.valuation(),
            |atom| atom_db.level_of(atom),
            watches,
        );
        Ok(())
    }

    /// Bumps the activity of the clause at `key` and notes its use for the
    /// deletion policy, promoting the clause when its block distance has
    /// notably improved.
    pub fn note_use(&mut self, key: ClauseKey, lbd_now: impl Fn(&DBClause) -> crate::config::LBD) {
        if let ClauseKey::Addition(_, _) = key {
            let max_activity = self.config.max_activity;
            let bump = self.bump;
            let frozen_bound = self.config.lbd_frozen_bound;

            let mut rescore = false;

            if let Ok(clause) = self.get_mut(&key) {
                clause.activity += bump;

                // Promotion, as in the block-distance deletion policy.
                if clause.lbd > 2 {
                    let fresh_lbd = lbd_now(clause);
                    if fresh_lbd + 1 < clause.lbd {
                        if clause.lbd <= frozen_bound {
                            clause.can_be_deleted = false;
                        }
                        clause.lbd = fresh_lbd;
                    }
                }

                rescore = clause.activity > max_activity;
            }

            if rescore {
                self.rescore_activity();
            }

            self.bump *= 1.0 / self.config.decay;
        }
    }

    /// Rescores the activity of every addition clause and the bump.
    fn rescore_activity(&mut self) {
        let factor = 1.0 / self.config.max_activity;
        for slot in self.addition.iter_mut().flatten() {
            slot.activity *= factor;
        }
        self.bump *= factor;
    }

    /// True if a reduction of the addition clauses is due, given the count of
    /// assigned atoms and conflicts so far.
    pub fn reduction_due(&mut self, assigned: usize, conflicts: usize) -> bool {
        match self.config.deletion {
            DeletionPolicy::Activity => {
                (self.addition_count as isize - assigned as isize) >= self.max_learned as isize
            }

            DeletionPolicy::BlockDistance => {
                if self.addition_count
                    >= (self.config.current_restart * self.config.reduce_base) as usize
                {
                    self.config.current_restart =
                        (conflicts as u32 / self.config.reduce_base) + 1;
                    self.config.reduce_base += self.config.reduce_increment;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Removes roughly half of the addition clauses, following the configured
    /// deletion policy.
    ///
    /// Clauses are protected when locked (the implicant of some assigned
    /// atom) and, under the block-distance policy, when promoted or with a
    /// block distance of at most two.
    pub fn reduce(&mut self, atom_db: &AtomDB, watches: &mut Watches) {
        let mut candidates: Vec<FormulaIndex> = Vec::with_capacity(self.addition_count);

        for slot in self.addition.iter().flatten() {
            if !slot.can_be_deleted {
                continue;
            }

            if clause_locked(slot, atom_db) {
                continue;
            }

            if matches!(self.config.deletion, DeletionPolicy::BlockDistance) && slot.lbd <= 2 {
                continue;
            }

            if let ClauseKey::Addition(index, _) = slot.key() {
                candidates.push(*index);
            }
        }

        match self.config.deletion {
            // Weakest activity first.
            DeletionPolicy::Activity => candidates.sort_unstable_by(|a, b| {
                let a_activity = self.addition[*a as usize].as_ref().unwrap().activity;
                let b_activity = self.addition[*b as usize].as_ref().unwrap().activity;
                a_activity.total_cmp(&b_activity)
            }),

            // Widest block distance first.
            DeletionPolicy::BlockDistance => candidates.sort_unstable_by(|a, b| {
                let a_lbd = self.addition[*a as usize].as_ref().unwrap().lbd;
                let b_lbd = self.addition[*b as usize].as_ref().unwrap().lbd;
                b_lbd.cmp(&a_lbd)
            }),
        }

        let limit = candidates.len() / 2;
        for index in candidates.into_iter().take(limit) {
            self.remove_addition(index, watches);
        }

        log::info!(target: targets::REDUCTION, "Addition clauses reduced to {}.", self.addition_count);
    }

    /// Removes the addition clause at `index`, detaching its watches.
    fn remove_addition(&mut self, index: FormulaIndex, watches: &mut Watches) -> Option<DBClause> {
        let removed = std::mem::take(&mut self.addition[index as usize]);
        match removed {
            None => {
                log::error!(target: targets::CLAUSE_DB, "Remove called on a missing addition clause.");
                None
            }
            Some(clause) => {
                let key = *clause.key();
                watches.unwatch_long(unsafe { *clause.get_unchecked(0) }, key);
                watches.unwatch_long(unsafe { *clause.get_unchecked(1) }, key);
                self.empty_keys.push(key);
                self.addition_count -= 1;
                Some(clause)
            }
        }
    }

    /// Level-zero simplification: removes addition clauses satisfied at level
    /// zero and shrinks the tails of the rest.
    ///
    /// Sound only at level zero, where a satisfied clause can never again
    /// participate in propagation and a falsified literal never again holds a
    /// value.
    pub fn simplify_at_level_zero(&mut self, atom_db: &AtomDB, watches: &mut Watches) {
        let mut removals: Vec<FormulaIndex> = Vec::default();

        for slot in self.addition.iter_mut().flatten() {
            if slot.is_satisfied_on(atom_db.valuation()) {
                if !clause_locked(slot, atom_db) {
                    if let ClauseKey::Addition(index, _) = slot.key() {
                        removals.push(*index);
                    }
                }
            } else {
                slot.shrink_tail(|literal| {
                    atom_db
                        .value_of(literal.atom())
                        .is_some_and(|value| value != literal.polarity())
                });
            }
        }

        for index in removals {
            self.remove_addition(index, watches);
        }
    }

    /// An iterator over all stored clauses.
    pub fn all_stored_clauses(&self) -> impl Iterator<Item = &DBClause> {
        self.original.iter().chain(self.addition.iter().flatten())
    }

    /// Computes the block distance of a clause: the number of distinct
    /// decision levels among its literals, ignoring assumptions.
    pub fn lbd_of(clause: &DBClause, atom_db: &AtomDB) -> crate::config::LBD {
        let mut levels: Vec<LevelIndex> = clause
            .clause()
            .iter()
            .filter(|literal| !atom_db.flags(literal.atom()).assumption)
            .filter_map(|literal| atom_db.level_of(literal.atom()))
            .collect();
        levels.sort_unstable();
        levels.dedup();
        levels.len() as crate::config::LBD
    }
}

/// Helpers for reconstructing reasons as clauses.
impl ClauseDB {
    /// The clause of a reason for the assignment of `literal`.
    ///
    /// For stored clauses and loop formulas this is a lookup; an implicit
    /// binary reason is constructed on demand from the assigned literal and
    /// the other (false) literal of the clause.
    /// Aggregate reasons are reconstructed by the aggregate itself, and are
    /// not handled here.
    pub fn reason_clause(
        &self,
        literal: CLiteral,
        reason: &Reason,
    ) -> Result<CClause, err::ClauseDBError> {
        match reason {
            Reason::Clause(key) | Reason::LoopFormula(key) => Ok(self.get(key)?.clause().clone()),

            Reason::Binary(other) => Ok(vec![literal, *other]),

            Reason::Aggregate { .. } => Err(err::ClauseDBError::Missing),
        }
    }

    /// Sets the threshold for the activity-sorted deletion policy from the
    /// count of original clauses, on the first call.
    pub fn initialise_deletion_threshold(&mut self) {
        if self.max_learned == 0.0 {
            self.max_learned = self.original.len() as f64 * self.config.learned_size_factor;
        }
    }

    /// Grows the deletion threshold geometrically, called per conflict batch.
    pub fn grow_deletion_threshold(&mut self) {
        self.max_learned *= self.config.learned_size_increment;
    }
}

/// True if the clause is the implicant of some assigned atom.
///
/// The asserted literal of an implicant is always at position 0.
pub fn clause_locked(clause: &DBClause, atom_db: &AtomDB) -> bool {
    let first = unsafe { *clause.get_unchecked(0) };
    match atom_db.value_of(first.atom()) {
        None => false,
        Some(_) => matches!(
            atom_db.source_of(first.atom()),
            AssignmentSource::BCP(Reason::Clause(key) | Reason::LoopFormula(key)) if key == *clause.key()
        ),
    }
}

/// A check used when importing shared clauses: true when some literal of the
/// clause is satisfied at level zero, i.e. the clause is subsumed by a proven
/// literal and is not worth storing.
pub fn subsumed_at_level_zero(clause: &CClause, atom_db: &AtomDB) -> bool {
    clause.iter().any(|literal| {
        atom_db
            .value_of(literal.atom())
            .is_some_and(|value| value == literal.polarity())
            && atom_db.level_of(literal.atom()) == Some(0)
    })
}
