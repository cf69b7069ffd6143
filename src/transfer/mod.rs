/*!
Clause sharing between solvers.

Solvers share no mutable state: learned clauses are published on a
[crossbeam channel](crossbeam::channel) and imported by whichever solver
holds the receiving end.

- **Export**: after analysis, a learned clause at or under the configured
  size bound is cloned onto the channel.
- **Import**: at each restart the receiving solver drains its channel.
  Each imported clause is cloned, cleaned, and re-checked: a clause satisfied
  at level zero is subsumed by a proven literal and rejected; the rest are
  dispatched as unit, binary, or long clauses, with the importing solver
  taking ownership.

A channel is attached with
[set_import_channel](crate::context::GenericContext::set_import_channel) /
[set_export_channel](crate::context::GenericContext::set_export_channel);
without one, both directions are no-ops.
*/

use std::collections::HashSet;

use crate::{
    context::GenericContext,
    db::clause::subsumed_at_level_zero,
    misc::log::targets,
    structures::{
        clause::{CClause, ClauseSource},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Publishes a learned clause on the export channel, when attached and
    /// the clause is at or under the configured size bound.
    pub(crate) fn export_clause(&mut self, clause: &CClause) {
        let bound = self.config.transfer_size_bound.value;
        if bound == 0 || clause.len() > bound {
            return;
        }

        if let Some(sender) = &self.export_channel {
            // A failed send means no receiver exists: drop the channel.
            if sender.send(clause.clone()).is_err() {
                log::warn!(target: targets::TRANSFER, "Export channel closed.");
                self.export_channel = None;
            }
        }
    }

    /// Drains the import channel, adding each clause not subsumed at level
    /// zero.
    ///
    /// To be called at a restart, with the trail at the lowest decision
    /// level.
    pub fn import_shared_clauses(&mut self) {
        // Unit imports are level-zero facts, so imports wait for a restart
        // which reaches level zero.
        if self.trail.level() != 0 {
            return;
        }

        let Some(receiver) = self.import_channel.take() else {
            return;
        };

        let mut imported = 0;
        while let Ok(clause) = receiver.try_recv() {
            if self.import_clause(clause) {
                imported += 1;
            }
        }

        if imported > 0 {
            log::info!(target: targets::TRANSFER, "Imported {imported} clauses.");
        }

        self.import_channel = Some(receiver);
    }

    /// Cleans and adds a single imported clause.
    /// Returns true when the clause was added.
    fn import_clause(&mut self, clause: CClause) -> bool {
        if subsumed_at_level_zero(&clause, &self.atom_db) {
            return false;
        }

        // Cleanup mirrors the add path: duplicates, tautologies, and
        // level-zero falsities.
        let mut cleaned = CClause::with_capacity(clause.len());
        let mut seen: HashSet<CLiteral> = HashSet::with_capacity(clause.len());

        for literal in clause {
            if literal.atom() as usize >= self.atom_db.count() {
                return false;
            }

            if seen.contains(&literal.negate()) {
                return false;
            }

            if self
                .atom_db
                .value_of(literal.atom())
                .is_some_and(|value| value != literal.polarity())
                && self.atom_db.level_of(literal.atom()) == Some(0)
            {
                continue;
            }

            if seen.insert(literal) {
                cleaned.push(literal);
            }
        }

        match cleaned.len() {
            0 => false,

            1 => {
                self.atom_db
                    .value_and_record(&mut self.trail, cleaned[0], AssignmentSource::Unit);
                true
            }

            2 => {
                self.watches.watch_binary(cleaned[0], cleaned[1]);
                self.watches.watch_binary(cleaned[1], cleaned[0]);
                true
            }

            _ => {
                match self
                    .clause_db
                    .store(cleaned, ClauseSource::Import, &mut self.watches)
                {
                    Ok(key) => self
                        .clause_db
                        .rewatch(key, &self.atom_db, &mut self.watches)
                        .is_ok(),
                    Err(_) => false,
                }
            }
        }
    }
}
