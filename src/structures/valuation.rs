//! Valuations: maps from atoms to an optional boolean value.
//!
//! The canonical representation is a vector of optional booleans indexed by
//! atoms.

use crate::structures::atom::Atom;

/// The canonical implementation of a valuation.
pub type VValuation = Vec<Option<bool>>;

/// Something which maps atoms to an optional boolean value.
pub trait Valuation {
    /// The value of the atom on the valuation, if any.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// The value of the atom on the valuation, if any.
    ///
    /// # Safety
    /// No check is made on whether the atom is part of the valuation.
    unsafe fn value_of_unchecked(&self, atom: Atom) -> Option<bool>;

    /// An iterator over the atoms of the valuation without a value.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// A count of the atoms in the valuation.
    fn atom_count(&self) -> usize;
}

impl Valuation for VValuation {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        *self.get(atom as usize).unwrap_or(&None)
    }

    unsafe fn value_of_unchecked(&self, atom: Atom) -> Option<bool> {
        *self.get_unchecked(atom as usize)
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter().enumerate().filter_map(|(atom, value)| {
            if value.is_none() {
                Some(atom as Atom)
            } else {
                None
            }
        })
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}
