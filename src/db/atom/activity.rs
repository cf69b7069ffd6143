//! Activity bookkeeping for atoms.
//!
//! Activity is a double-precision float.
//! Overflow is countered by rescaling: when a bump would push some activity
//! over the permitted maximum, every activity and the bump itself are scaled
//! down by the reciprocal of the maximum.

use crate::{
    config::{Activity, AtomDBConfig},
    generic::index_heap::IndexHeap,
    structures::atom::Atom,
};

/// Bumps the activities of each atom in the given iterator, and increases the
/// bump for next time.
///
/// If the bumped activity would be greater than the maximum allowed activity,
/// the activity of every atom is rescored.
pub fn bump_relative<A: Iterator<Item = Atom>>(
    atoms: A,
    index_heap: &mut IndexHeap<Activity>,
    config: &mut AtomDBConfig,
) {
    for atom in atoms {
        if *index_heap.value_at(atom as usize) + config.bump > config.max_activity {
            rescore_activity(index_heap, config);
        }
        bump_activity(atom, index_heap, config);
    }

    exponent_activity(config);
}

/// Rescores the activity of all atoms and the activity bump.
fn rescore_activity(index_heap: &mut IndexHeap<Activity>, config: &mut AtomDBConfig) {
    let factor = 1.0 / config.max_activity;
    let rescale = |v: &Activity| v * factor;
    index_heap.apply_to_all(rescale);
    config.bump *= factor;
    index_heap.heapify();
}

/// Bumps the activity of an atom and updates it's position on the activity
/// heap, if the atom is on the activity heap.
fn bump_activity(atom: Atom, index_heap: &mut IndexHeap<Activity>, config: &AtomDBConfig) {
    index_heap.apply_to_index(atom as usize, |v| v + config.bump);
    index_heap.heapify_if_active(atom as usize);
}

/// Increase the activity bump applied to atoms by a factor.
fn exponent_activity(config: &mut AtomDBConfig) {
    config.bump *= 1.0 / config.decay;
}
