/*!
Propagation of a single literal.

See [propagate_literal](GenericContext::propagate_literal) for the relevant
context method.

# Overview

Propagates an atom being assigned some value, given as a literal `L`.
As `L` is true, `¬L` is false, and the engine runs three phases in order:

1. **Binary short propagation.**
   For every implication `M` in the binary implication list of `¬L`: if `M`
   is false, a conflict is reported with an implicitly constructed binary
   reason; if `M` has no value, `M` is assigned true at the current level
   with an implicit binary reason.

2. **Unit propagation via watches.**
   For each long clause watching `¬L` the watches of the clause are updated,
   if possible.
   Otherwise the clause either asserts its other watch, or conflicts with the
   current valuation.

3. **Propagator dispatch.**
   Aggregates subscribed to `L` update their counters, which may force
   further assignments or a conflict; components subscribed to `L` are queued
   for an unfounded-set check at propagation fixpoint.

# Complications

The long watch list of `¬L` is *taken* from the watch database for the
duration of phase two, as moving a watch mutates the lists of other literals
while the list of `¬L` is under iteration.
This is sound, as `¬L` is never a candidate for a fresh watch: its atom has a
value, and that value conflicts with the valuation.
*/

use crate::{
    context::GenericContext,
    db::{atom::AtomValue, clause::WatchStatus},
    misc::log::targets,
    structures::{
        consequence::{AssignmentSource, Reason},
        literal::{CLiteral, Literal},
    },
    types::err,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Propagates a literal taken from the trail.
    ///
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    pub fn propagate_literal(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let GenericContext {
            atom_db,
            clause_db,
            watches,
            trail,
            propagators,
            ..
        } = self;

        let falsified = literal.negate();

        // Binary short propagation.
        for watch in watches.binary_watches(falsified) {
            let implied = watch.implied;

            match atom_db.value_of(implied.atom()) {
                None => {
                    atom_db.value_and_record(
                        trail,
                        implied,
                        AssignmentSource::BCP(Reason::Binary(falsified)),
                    );
                    log::trace!(target: targets::PROPAGATION, "Implied {implied} via {falsified}.");
                }

                Some(value) if value != implied.polarity() => {
                    log::trace!(target: targets::PROPAGATION, "Conflict on {implied} via {falsified}.");
                    return Err(err::BCPError::Conflict(implied, Reason::Binary(falsified)));
                }

                Some(_) => {}
            }
        }

        // Unit propagation via watches.
        let mut watch_list = watches.take_long_watches(falsified);

        let mut index = 0;
        let mut length = watch_list.len();

        'long_loop: while index < length {
            let key = watch_list[index].key;

            let db_clause = match clause_db.get_mut(&key) {
                Ok(stored_clause) => stored_clause,
                Err(_) => {
                    // The clause was deleted; the watch is lazily released.
                    watch_list.swap_remove(index);
                    length -= 1;
                    continue 'long_loop;
                }
            };

            match db_clause.update_watch(falsified.atom(), atom_db.valuation(), watches) {
                WatchStatus::Moved => {
                    watch_list.swap_remove(index);
                    length -= 1;
                    continue 'long_loop;
                }

                WatchStatus::Witness => {}

                WatchStatus::Asserting => {
                    // After the update, the asserted literal is at position 0.
                    let asserted = unsafe { *db_clause.get_unchecked(0) };

                    match atom_db.value_and_record(
                        trail,
                        asserted,
                        AssignmentSource::BCP(Reason::Clause(key)),
                    ) {
                        AtomValue::NotSet | AtomValue::Same => {}
                        AtomValue::Different => {
                            watches.give_back_long_watches(falsified, watch_list);
                            return Err(err::BCPError::Conflict(asserted, Reason::Clause(key)));
                        }
                    }
                }

                WatchStatus::Conflict => {
                    let conflicting = unsafe { *db_clause.get_unchecked(0) };
                    watches.give_back_long_watches(falsified, watch_list);
                    return Err(err::BCPError::Conflict(conflicting, Reason::Clause(key)));
                }
            }

            index += 1;
        }

        watches.give_back_long_watches(falsified, watch_list);

        // Propagator dispatch.
        for subscription in watches.aggregate_subscriptions(literal) {
            let id = subscription.id;
            let level = trail.level();

            propagators.aggregates[id as usize].apply(subscription.index, level);
            propagators.register_for_unroll(id, level);

            let aggregate = &propagators.aggregates[id as usize];

            match aggregate.slack() {
                None => {
                    log::trace!(target: targets::AGGREGATE, "Aggregate {id} exceeded by {literal}.");
                    let reason = Reason::Aggregate {
                        id,
                        trail_length: trail.assignment_count(),
                    };
                    return Err(err::BCPError::Conflict(literal, reason));
                }

                Some(_) => {
                    let forced: Vec<CLiteral> = aggregate.forced_members(atom_db).collect();

                    for negation in forced {
                        let reason = Reason::Aggregate {
                            id,
                            trail_length: trail.assignment_count(),
                        };

                        match atom_db.value_and_record(
                            trail,
                            negation,
                            AssignmentSource::BCP(reason),
                        ) {
                            AtomValue::NotSet | AtomValue::Same => {}
                            AtomValue::Different => {
                                return Err(err::BCPError::Conflict(negation, reason));
                            }
                        }
                    }
                }
            }
        }

        for component in watches.component_subscriptions(literal) {
            propagators.queue_component(*component);
        }

        Ok(())
    }
}
