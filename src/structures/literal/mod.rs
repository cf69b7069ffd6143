//! Literals are atoms paired with a (boolean) polarity.
//!
//! The 'canonical' implementation of the literal trait is the [CLiteral]
//! structure, made of an atom and a boolean.
//!
//! Every literal has an *index*: `2·atom + polarity`.
//! Indicies identify literals with cells of per-literal structures (watch
//! lists, occurrence marks, …), and the index of the negation of a literal is
//! always the index of the literal with the least significant bit flipped.
//!
//! ```rust
//! # use heron_asp::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert_eq!(literal.atom(), 79);
//! assert!(literal.polarity());
//!
//! assert_eq!(literal.index(), 2 * 79 + 1);
//! assert_eq!(literal.negate().index(), literal.index() ^ 1);
//! assert_eq!(literal.negate().negate(), literal);
//! ```

mod c_literal;
pub use c_literal::CLiteral;

use crate::structures::atom::Atom;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a polarity.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The index of the literal: `2·atom + polarity`.
    fn index(&self) -> usize;

    /// The literal whose index is `index`.
    fn from_index(index: usize) -> Self;

    /// The literal in it's canonical form.
    fn canonical(&self) -> CLiteral;

    /// The literal in it's integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;
}
