use crate::types::err;

/// The index to a stored clause.
pub type FormulaIndex = u32;

/// The token of a formula index, used to distinguish re-use of the same
/// [FormulaIndex].
pub type FormulaToken = u16;

/// A key to access a clause stored in the clause database.
///
/// Within the clause database clauses are stored in indexed vectors, and keys
/// contain the index to the clause together with a token to distinguish reuse
/// of the same index, where relevant.
///
/// Unit clauses are recorded on the trail rather than stored, and binary
/// clauses live in the binary implication lists, so keys exist only for long
/// clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// The key to an original clause.
    Original(FormulaIndex),

    /// The key to an addition clause.
    Addition(FormulaIndex, FormulaToken),
}

impl ClauseKey {
    /// Extracts the index from a key.
    pub fn index(&self) -> usize {
        match self {
            Self::Original(index) => *index as usize,
            Self::Addition(index, _) => *index as usize,
        }
    }

    /// Retokens an addition key to distinguish multiple uses of the same
    /// index.
    ///
    /// Returns an error if used on an original key, or if the token limit has
    /// been reached.
    pub fn retoken(&self) -> Result<Self, err::ClauseDBError> {
        match self {
            Self::Original(_) => Err(err::ClauseDBError::InvalidKeyToken),

            Self::Addition(index, token) => {
                if *token == FormulaToken::MAX {
                    return Err(err::ClauseDBError::StorageExhausted);
                }
                Ok(ClauseKey::Addition(*index, token + 1))
            }
        }
    }
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original(index) => write!(f, "Original({index})"),
            Self::Addition(index, token) => write!(f, "Addition({index}, {token})"),
        }
    }
}
