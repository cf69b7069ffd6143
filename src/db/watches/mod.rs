/*!
Per-literal data structures: watch lists and propagator subscriptions.

# Watched literals

A core part of a solve is [Boolean Constraint Propagation](crate::procedures::bcp) (BCP).
In short, BCP is the observation that some literal in a clause must be true
due to all other literals in the clause being false.

This motivates keeping two watches per clause:
- One watch on a literal without a value, to note the clause is a candidate
  for BCP at some point.
- One watch on any other literal which does not conflict with the background
  valuation, if possible.

The watched literals of a clause are its first two literals, and an update to
the watches swaps some non-false literal into the second position --- see
[update_watch](crate::db::clause::DBClause::update_watch).

The watchers of an atom are distinguished by the length of the watching
clause:

1. Binary clauses never update their watches, and so the *other* literal of
   the clause is recorded in the watch to avoid a trip to a clause store.
   The binary watch lists of a literal double as the binary implication lists
   consulted by short propagation and binary-resolution minimization.
2. Long clauses are recorded by key.

# Propagator subscriptions

Aggregates subscribe to the literals they contain with a positional hint, so
propagation updates the relevant counter without scanning the aggregate.
Unfounded-set checkers subscribe to the negations of support literals, so a
component is queued for a check exactly when some support is falsified.
Both subscriptions fire when the subscribed literal becomes *true*.

# Optimization markers

Each literal carries a marker bit noting whether it is registered as an
optimization literal, consulted during core minimization.
*/

use crate::{
    db::keys::ClauseKey,
    propagators::{AggregateId, ComponentId},
    structures::literal::{CLiteral, Literal},
};

/// A binary clause watch: the *other* literal of the clause.
#[derive(Clone, Copy)]
pub struct BinaryWatch {
    /// The literal implied when the watched literal is falsified.
    pub implied: CLiteral,
}

/// A long clause watch.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LongWatch {
    /// The key of the watching clause.
    pub key: ClauseKey,
}

/// An aggregate subscription, with a positional hint.
#[derive(Clone, Copy)]
pub struct AggregateWatch {
    /// The id of the subscribed aggregate.
    pub id: AggregateId,

    /// The index of the subscribed literal within the aggregate.
    pub index: u32,
}

/// The per-literal structures of a single atom, split by polarity.
#[derive(Default)]
struct WatchDB {
    /// Watches from binary clauses containing the literal, by polarity.
    binary: [Vec<BinaryWatch>; 2],

    /// Watches from long clauses watching the literal, by polarity.
    long: [Vec<LongWatch>; 2],

    /// Aggregates subscribed to the literal becoming true, by polarity.
    aggregates: [Vec<AggregateWatch>; 2],

    /// Components subscribed to the literal becoming true, by polarity.
    components: [Vec<ComponentId>; 2],

    /// Whether the literal is an optimization literal, by polarity.
    optimization: [bool; 2],
}

/// The watch database: per-literal structures for every atom.
#[derive(Default)]
pub struct Watches {
    dbs: Vec<WatchDB>,
}

impl Watches {
    /// Extends the database to support a fresh atom.
    pub fn fresh_atom(&mut self) {
        self.dbs.push(WatchDB::default());
    }

    fn db(&self, literal: CLiteral) -> &WatchDB {
        &self.dbs[literal.atom() as usize]
    }

    fn db_mut(&mut self, literal: CLiteral) -> &mut WatchDB {
        &mut self.dbs[literal.atom() as usize]
    }

    /// Notes a binary clause `(literal ∨ implied)` in the implication list of
    /// `literal`.
    pub fn watch_binary(&mut self, literal: CLiteral, implied: CLiteral) {
        let polarity = literal.polarity() as usize;
        self.db_mut(literal).binary[polarity].push(BinaryWatch { implied });
    }

    /// The binary implication list of `literal`: each entry is implied when
    /// `literal` is falsified.
    pub fn binary_watches(&self, literal: CLiteral) -> &[BinaryWatch] {
        &self.db(literal).binary[literal.polarity() as usize]
    }

    /// Notes the clause at `key` watches `literal`.
    pub fn watch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        let polarity = literal.polarity() as usize;
        self.db_mut(literal).long[polarity].push(LongWatch { key });
    }

    /// Removes the watch of the clause at `key` on `literal`, if present.
    pub fn unwatch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        let polarity = literal.polarity() as usize;
        let list = &mut self.db_mut(literal).long[polarity];
        let mut index = 0;
        let mut limit = list.len();
        while index < limit {
            if list[index].key == key {
                list.swap_remove(index);
                limit -= 1;
            } else {
                index += 1;
            }
        }
    }

    /// Takes the long watch list of `literal` for iteration during BCP.
    /// To be restored with [give_back_long_watches](Watches::give_back_long_watches).
    ///
    /// Taking the list avoids aliasing: an update to the watches of a clause
    /// mutates the lists of *other* literals, as the falsified literal is
    /// never a candidate for a fresh watch.
    pub fn take_long_watches(&mut self, literal: CLiteral) -> Vec<LongWatch> {
        let polarity = literal.polarity() as usize;
        std::mem::take(&mut self.db_mut(literal).long[polarity])
    }

    /// Restores a long watch list taken with
    /// [take_long_watches](Watches::take_long_watches), preserving watches
    /// noted in the interim.
    pub fn give_back_long_watches(&mut self, literal: CLiteral, mut watches: Vec<LongWatch>) {
        let polarity = literal.polarity() as usize;
        let list = &mut self.db_mut(literal).long[polarity];
        if !list.is_empty() {
            watches.append(list);
        }
        *list = watches;
    }

    /// Subscribes the aggregate to `literal` becoming true.
    pub fn subscribe_aggregate(&mut self, literal: CLiteral, id: AggregateId, index: u32) {
        let polarity = literal.polarity() as usize;
        self.db_mut(literal).aggregates[polarity].push(AggregateWatch { id, index });
    }

    /// The aggregates subscribed to `literal` becoming true.
    pub fn aggregate_subscriptions(&self, literal: CLiteral) -> &[AggregateWatch] {
        &self.db(literal).aggregates[literal.polarity() as usize]
    }

    /// Subscribes the component to `literal` becoming true.
    pub fn subscribe_component(&mut self, literal: CLiteral, id: ComponentId) {
        let polarity = literal.polarity() as usize;
        self.db_mut(literal).components[polarity].push(id);
    }

    /// The components subscribed to `literal` becoming true.
    pub fn component_subscriptions(&self, literal: CLiteral) -> &[ComponentId] {
        &self.db(literal).components[literal.polarity() as usize]
    }

    /// Marks `literal` as an optimization literal.
    pub fn mark_optimization(&mut self, literal: CLiteral) {
        let polarity = literal.polarity() as usize;
        self.db_mut(literal).optimization[polarity] = true;
    }

    /// True if `literal` is marked as an optimization literal.
    pub fn is_optimization(&self, literal: CLiteral) -> bool {
        self.db(literal).optimization[literal.polarity() as usize]
    }

    /// A count of atoms supported by the database.
    pub fn atom_count(&self) -> usize {
        self.dbs.len()
    }

    /// Removes satisfied binary implications of assigned atoms at level zero.
    ///
    /// Part of level-zero simplification: an implication list entry whose
    /// implied literal is true at level zero can never propagate again.
    pub fn shrink_binary_lists(&mut self, satisfied: impl Fn(CLiteral) -> bool) {
        for db in self.dbs.iter_mut() {
            for list in db.binary.iter_mut() {
                list.retain(|watch| !satisfied(watch.implied));
            }
        }
    }
}
