/*!
A clause, as stored in the clause database.

# Watched literals

The watched literals of a clause are the literals at positions 0 and 1.

An update to the watches is called when the atom of one of the watched
literals is falsified.
The falsified literal is first swapped to position 1, and the tail of the
clause (positions 2..) is scanned for a non-false literal to swap into
position 1 and watch in its place.
If no such literal exists the clause either asserts the literal at position 0
or conflicts with the current valuation.

Two invariants are maintained:
<div class="warning">
The literals at positions 0 and 1 are the two watched literals, and no two
watches of a clause are the same literal.
</div>
<div class="warning">
If the clause is the implicant of some atom, the literal of that atom is at
position 0.
</div>
*/

use crate::{
    config::{Activity, LBD},
    db::{keys::ClauseKey, watches::Watches, LevelIndex},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

/// The status of a watched literal after an update, relative to the valuation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    /// The watch moved to some non-false literal; the old watch is released.
    Moved,

    /// The other watched literal witnesses satisfaction; the watch is kept.
    Witness,

    /// The clause asserts the literal at position 0; the watch is kept.
    Asserting,

    /// Every literal of the clause conflicts with the valuation.
    Conflict,
}

/// A clause stored in the clause database, together with its metadata.
pub struct DBClause {
    /// The key of the clause.
    key: ClauseKey,

    /// The literals of the clause.
    clause: CClause,

    /// The activity of the clause.
    pub activity: Activity,

    /// The literal block distance of the clause at the last computation.
    pub lbd: LBD,

    /// False if the clause has been promoted and must survive reductions.
    pub can_be_deleted: bool,
}

impl DBClause {
    /// A stored clause, from a key and its literals.
    pub fn from(key: ClauseKey, clause: CClause) -> Self {
        DBClause {
            key,
            clause,
            activity: 1.0,
            lbd: 0,
            can_be_deleted: true,
        }
    }

    /// The key of the clause.
    pub fn key(&self) -> &ClauseKey {
        &self.key
    }

    /// The literals of the clause.
    pub fn clause(&self) -> &CClause {
        &self.clause
    }

    /// The literal at `index` of the clause.
    ///
    /// # Safety
    /// No check is made that `index` is within the bounds of the clause.
    pub unsafe fn get_unchecked(&self, index: usize) -> &CLiteral {
        self.clause.get_unchecked(index)
    }

    /// The number of literals in the clause.
    pub fn size(&self) -> usize {
        self.clause.len()
    }

    /// An iterator over the atoms of the clause.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.clause.iter().map(|literal| literal.atom())
    }

    /// Notes both watches of the clause in the watch database.
    ///
    /// To be used when the first two positions of the clause are known to be
    /// appropriate watches, e.g. for a fresh asserting clause after a
    /// backjump.
    pub fn note_watches(&self, watches: &mut Watches) {
        watches.watch_long(self.clause[0], self.key);
        watches.watch_long(self.clause[1], self.key);
    }

    /// Orders the first two positions of the clause to hold appropriate
    /// watches with respect to the given valuation, and notes the watches.
    ///
    /// A non-false literal is preferred for each watch; failing that, a
    /// literal falsified at the highest decision level, so that backjumps
    /// release the watch as early as possible.
    pub fn initialise_watches(
        &mut self,
        valuation: &impl Valuation,
        level_of: impl Fn(Atom) -> Option<LevelIndex>,
        watches: &mut Watches,
    ) {
        for slot in 0..2_usize {
            let mut chosen = slot;
            let mut chosen_level = None;

            for index in slot..self.clause.len() {
                let literal = self.clause[index];
                match valuation.value_of(literal.atom()) {
                    None => {
                        chosen = index;
                        break;
                    }

                    Some(value) if value == literal.polarity() => {
                        chosen = index;
                        break;
                    }

                    Some(_) => {
                        let level = level_of(literal.atom());
                        if chosen_level.is_none() || level > chosen_level {
                            chosen = index;
                            chosen_level = level;
                        }
                    }
                }
            }

            self.clause.swap(slot, chosen);
        }

        self.note_watches(watches);
    }

    /// Updates the watched literals, given the atom of a watched literal has
    /// been falsified.
    ///
    /// On [Moved](WatchStatus::Moved) the caller releases the old watch by
    /// removing the clause from the watch list being examined; on any other
    /// status the watch is kept.
    pub fn update_watch(
        &mut self,
        atom: Atom,
        valuation: &impl Valuation,
        watches: &mut Watches,
    ) -> WatchStatus {
        // The watch to update is swapped to position 1.
        if self.clause[0].atom() == atom {
            self.clause.swap(0, 1);
        }

        // If the clause is satisfied by the other watch, do nothing.
        let watch_a = self.clause[0];
        if valuation
            .value_of(watch_a.atom())
            .is_some_and(|value| value == watch_a.polarity())
        {
            return WatchStatus::Witness;
        }

        for index in 2..self.clause.len() {
            let literal = self.clause[index];
            let falsified = valuation
                .value_of(literal.atom())
                .is_some_and(|value| value != literal.polarity());

            if !falsified {
                self.clause.swap(1, index);
                watches.watch_long(self.clause[1], self.key);
                return WatchStatus::Moved;
            }
        }

        match valuation.value_of(watch_a.atom()) {
            None => WatchStatus::Asserting,
            Some(_) => WatchStatus::Conflict,
        }
    }

    /// Removes literals falsified at level zero from the tail of the clause
    /// (positions 2..), leaving the watched positions untouched.
    pub fn shrink_tail(&mut self, falsified: impl Fn(CLiteral) -> bool) {
        let mut index = 2;
        while index < self.clause.len() {
            if falsified(self.clause[index]) {
                self.clause.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }

    /// True if some literal of the clause is satisfied on the valuation.
    pub fn is_satisfied_on(&self, valuation: &impl Valuation) -> bool {
        self.clause.iter().any(|literal| {
            valuation
                .value_of(literal.atom())
                .is_some_and(|value| value == literal.polarity())
        })
    }
}

impl std::fmt::Display for DBClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.clause.as_string())
    }
}
