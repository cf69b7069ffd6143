/*!
Analysis of a conflict: first-UIP resolution, minimization, and learning.

Takes the noted conflict and applies resolution to the clauses used to
(eventually) make the observation of the conflict, given the decisions made.

# Overview

- The [resolution buffer](crate::resolution_buffer) is primed with the
  current valuation, with the cells of top-level assignments cleared, and the
  clause of the conflict reason is merged.
- The top level of the trail is walked in reverse: each assignment whose atom
  is in the buffer is used as a pivot, with the clause of its reason merged,
  until exactly one top-level literal remains --- the first unique
  implication point.
- The derived clause is minimized:
  + By self-subsumption: a literal is removed when every other literal of its
    reason is in the clause or proven at level zero.
  + By binary resolution, for clauses with a low block distance: a literal is
    removed when its complement is implied by the asserted literal through a
    binary clause.
- The block distance of the clause is computed (ignoring assumptions), a
  backjump is made to the maximum decision level among the non-asserted
  literals, and the clause is stored: unit clauses as level-zero assignments,
  binary clauses in the implication lists, and longer clauses in the clause
  database with the asserted literal and a maximum-level literal as watches.

The asserted literal is *not* valued here: the caller values the literal with
the learned clause as reason, which also keeps bookkeeping (restart and
deletion scheduling) in one place.

# Activity

Atom activity is bumped per the configured VSIDS variant: the atoms of the
conflict clause (Chaff), or every atom used during resolution (MiniSAT).
The activity of each addition clause used during resolution is also bumped,
with the promotion rule applied when a block distance improves.
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets,
    resolution_buffer::{ResolutionBuffer, ResolutionOk},
    structures::{
        clause::{CClause, Clause, ClauseSource},
        consequence::{AssignmentSource, Reason},
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Possible 'Ok' results from conflict analysis.
pub enum AnalysisOk {
    /// The result of analysis is a unit clause; a backjump to level zero has
    /// been made, and the literal is to be valued there.
    UnitClause {
        /// The literal of the clause.
        literal: CLiteral,
    },

    /// The result of analysis is a binary clause, stored in the implication
    /// lists; a backjump has been made.
    AssertingBinary {
        /// The asserted literal.
        literal: CLiteral,

        /// The other (false) literal of the clause.
        other: CLiteral,
    },

    /// The result of analysis is a (non-unit, non-binary) asserting clause,
    /// stored in the clause database; a backjump has been made.
    AssertingClause {
        /// The key of the stored clause.
        key: ClauseKey,

        /// The asserted literal.
        literal: CLiteral,
    },
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Analyses the noted conflict.
    ///
    /// For documentation see [procedures::analysis](crate::procedures::analysis).
    ///
    /// To be called only when some decision is current: a conflict without a
    /// decision is fundamental, or an assumption failure.
    pub fn analyze_conflict(&mut self) -> Result<AnalysisOk, ErrorKind> {
        let conflict = match self.conflict.take() {
            Some(conflict) => conflict,
            None => return Err(err::AnalysisError::MissingConflict.into()),
        };
        self.propagators.reset_pending();

        log::info!(target: targets::ANALYSIS, "Analysis of a conflict on {} at level {}.", conflict.literal, self.trail.level());

        self.counters.total_conflicts += 1;
        self.counters.fresh_conflicts += 1;
        self.note_conflict_for_restarts();

        let conflict_clause = self.explain(conflict.literal, conflict.reason)?;

        if let crate::config::VSIDS::Chaff = self.config.vsids_variant.value {
            self.atom_db.bump_relative(conflict_clause.atoms());
        }

        // Resolution.
        let mut buffer = ResolutionBuffer::from_valuation(
            self.atom_db.valuation(),
            self.trail.top_level_assignments().iter(),
        );

        match buffer.merge_conflict(&conflict_clause) {
            Ok(ResolutionOk::UIP) => {
                let top_level = self.trail.take_assignments();
                let level_start =
                    self.trail.level_indicies[self.trail.level() as usize - 1];

                let mut resolution_error: Option<ErrorKind> = None;

                'resolution_loop: for index in (level_start..top_level.len()).rev() {
                    if buffer.valueless_count() <= 1 {
                        break 'resolution_loop;
                    }

                    let literal = top_level[index];

                    match self.atom_db.source_of(literal.atom()) {
                        AssignmentSource::BCP(reason) => {
                            if !buffer.contains_atom(literal.atom()) {
                                continue 'resolution_loop;
                            }

                            let reason_clause = match self.explain(literal, Some(reason)) {
                                Ok(clause) => clause,
                                Err(e) => {
                                    resolution_error = Some(e);
                                    break 'resolution_loop;
                                }
                            };

                            match buffer.resolve_clause(&reason_clause, literal) {
                                Ok(true) => {
                                    if let Reason::Clause(key) | Reason::LoopFormula(key) = reason
                                    {
                                        let atom_db = &self.atom_db;
                                        self.clause_db.note_use(key, |clause| {
                                            crate::db::clause::ClauseDB::lbd_of(clause, atom_db)
                                        });
                                    }
                                }
                                Ok(false) => {}
                                Err(buffer_error) => {
                                    resolution_error = Some(buffer_error.into());
                                    break 'resolution_loop;
                                }
                            }
                        }

                        // Resolution stops before any decision or assumption.
                        AssignmentSource::Decision
                        | AssignmentSource::Assumption
                        | AssignmentSource::Unit => break 'resolution_loop,
                    }
                }

                self.trail.restore_assignments(top_level);

                if let Some(e) = resolution_error {
                    return Err(e);
                }
            }

            Ok(ResolutionOk::AlreadyAsserting) => {}

            Err(buffer_error) => return Err(buffer_error.into()),
        }

        if buffer.valueless_count() != 1 {
            log::error!(target: targets::ANALYSIS, "Resolution stopped with {} top-level literals.", buffer.valueless_count());
            return Err(err::AnalysisError::NoAssertion.into());
        }

        if let crate::config::VSIDS::MiniSAT = self.config.vsids_variant.value {
            let used: Vec<crate::structures::atom::Atom> = buffer.atoms_used().collect();
            self.atom_db.bump_relative(used.into_iter());
        }

        // Minimization.
        if self.config.minimization.value {
            self.minimize_by_self_subsumption(&mut buffer)?;
        }

        let mut clause = buffer.to_assertion_clause();
        debug_assert!(!clause.is_empty());

        if self.config.binary_minimization.value && clause.len() > 2 {
            let lbd = self.lbd_of_clause(&clause);
            if lbd <= self.config.clause_db.lbd_minimization_bound {
                self.minimize_by_binary_resolution(&mut clause);
            }
        }

        log::info!(target: targets::ANALYSIS, "Learned clause: {}.", clause.as_string());

        self.learn_asserting_clause(clause)
    }

    /// Stores an asserting clause (asserted literal first) after backjumping
    /// to the appropriate level, without valuing the asserted literal.
    pub(crate) fn learn_asserting_clause(
        &mut self,
        mut clause: CClause,
    ) -> Result<AnalysisOk, ErrorKind> {
        match clause.len() {
            0 => Err(err::AnalysisError::EmptyResolution.into()),

            1 => {
                let literal = clause[0];
                self.backjump(0);
                self.counters.lbd_window.push(1);
                self.counters.sum_lbd += 1.0;
                self.export_clause(&clause);
                Ok(AnalysisOk::UnitClause { literal })
            }

            2 => {
                let literal = clause[0];
                let other = clause[1];

                self.backjump(self.asserting_backjump_level(&clause));

                self.watches.watch_binary(literal, other);
                self.watches.watch_binary(other, literal);

                self.counters.lbd_window.push(2);
                self.counters.sum_lbd += 2.0;

                self.export_clause(&clause);

                Ok(AnalysisOk::AssertingBinary { literal, other })
            }

            _ => {
                // A maximum-level literal is placed second, so the clause
                // watches the literals unassigned last.
                let mut max_index = 1;
                let mut max_level = self.atom_db.level_of(clause[1].atom());
                for index in 2..clause.len() {
                    let level = self.atom_db.level_of(clause[index].atom());
                    if level > max_level {
                        max_index = index;
                        max_level = level;
                    }
                }
                clause.swap(1, max_index);

                let lbd = self.lbd_of_clause(&clause);
                let literal = clause[0];

                self.backjump(self.asserting_backjump_level(&clause));

                self.export_clause(&clause);

                let key = self
                    .clause_db
                    .store(clause, ClauseSource::Resolution, &mut self.watches)?;
                if let Ok(stored) = self.clause_db.get_mut(&key) {
                    stored.lbd = lbd;
                }

                self.counters.lbd_window.push(lbd as u64);
                self.counters.sum_lbd += lbd as f64;

                Ok(AnalysisOk::AssertingClause { key, literal })
            }
        }
    }

    /// The clause of a reason for `literal`, reconstructed as required.
    pub fn explain(
        &self,
        literal: CLiteral,
        reason: Option<Reason>,
    ) -> Result<CClause, ErrorKind> {
        match reason {
            None => Ok(vec![literal]),

            Some(Reason::Aggregate { id, trail_length }) => Ok(self.propagators.aggregates
                [id as usize]
                .explanation(None, trail_length, &self.atom_db)),

            Some(reason) => Ok(self.clause_db.reason_clause(literal, &reason)?),
        }
    }

    /// The block distance of a clause: the number of distinct decision levels
    /// among its literals, ignoring assumptions.
    pub fn lbd_of_clause(&self, clause: &impl Clause) -> crate::config::LBD {
        let mut levels: Vec<crate::db::LevelIndex> = clause
            .literals()
            .filter(|literal| !self.atom_db.flags(literal.atom()).assumption)
            .filter_map(|literal| self.atom_db.level_of(literal.atom()))
            .collect();
        levels.sort_unstable();
        levels.dedup();
        levels.len() as crate::config::LBD
    }

    /// Removes literals from the buffer by self-subsumption: a literal is
    /// redundant when every other literal of its reason is in the clause or
    /// proven at level zero.
    fn minimize_by_self_subsumption(
        &mut self,
        buffer: &mut ResolutionBuffer,
    ) -> Result<(), ErrorKind> {
        let candidates: Vec<crate::structures::atom::Atom> = buffer
            .atoms_used()
            .filter(|atom| buffer.contains_atom(*atom))
            .collect();

        for atom in candidates {
            let reason = match self.atom_db.source_of(atom) {
                AssignmentSource::BCP(reason) => reason,
                _ => continue,
            };

            let literal = match buffer.literal_of(atom) {
                Some(literal) => literal,
                None => continue,
            };

            // The asserted (top-level) literal is never a candidate.
            if self.atom_db.level_of(atom) == Some(self.trail.level()) {
                continue;
            }

            let reason_clause = self.explain(literal.negate(), Some(reason))?;

            let redundant = reason_clause.literals().all(|reason_literal| {
                reason_literal.atom() == atom
                    || buffer.contains_atom(reason_literal.atom())
                    || self.atom_db.level_of(reason_literal.atom()) == Some(0)
            });

            if redundant {
                buffer.strengthen(atom);
            }
        }

        Ok(())
    }

    /// Removes literals from the clause by resolution against binary
    /// implications of the asserted literal: with `p` the asserted literal
    /// and `p → imp` a binary implication, `¬imp` is redundant whenever `imp`
    /// is true.
    fn minimize_by_binary_resolution(&mut self, clause: &mut CClause) {
        let asserted = clause[0];

        let mut removals = 0;
        for watch in self.watches.binary_watches(asserted) {
            let implied = watch.implied;

            if self
                .atom_db
                .value_of(implied.atom())
                .is_some_and(|value| value == implied.polarity())
            {
                if let Some(position) = clause
                    .iter()
                    .skip(1)
                    .position(|literal| *literal == implied.negate())
                {
                    clause.swap_remove(position + 1);
                    removals += 1;
                }
            }
        }

        if removals > 0 {
            log::trace!(target: targets::ANALYSIS, "Binary minimization removed {removals} literals.");
        }
    }
}
