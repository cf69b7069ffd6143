/*!
(The internal representation of) an atom, aka. a 'variable'.

Atoms are things to which assigning a boolean value is of interest.

Each atom is a `u32`, and the atoms of a context are `[0..n)` for some *n*.
This allows atoms to be used as the indicies of the structures which record
per-atom information (valuation, decision level, watch lists, and so on)
without translation.

# Notes
- Atom `0` is created with every context and fixed true at level zero, so
  external identifiers may (but need not) start from `1`.
- In the SAT literature these are often called 'variables' while in the
  logic-programming literature these are called 'atoms'.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Limited by the representation of literal indicies, which pack an atom and
/// a polarity into a single word.
pub const ATOM_MAX: Atom = Atom::MAX >> 1;
