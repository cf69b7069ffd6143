/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some are internally expected --- e.g. BCP errors are used to control the
  flow of a solve, with a conflict being a learning opportunity rather than a
  failure.
- Others are external --- e.g. a context returns a `Build` error to highlight
  an addition which makes the formula trivially unsatisfiable.

Names of the error enums --- for the most part --- overlap with corresponding
structs.
*/

use crate::structures::{consequence::Reason, literal::CLiteral};

/// A union of varied error kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// An error during conflict analysis.
    Analysis(AnalysisError),

    /// An error when building a context.
    Build(BuildError),

    /// An error in the atom database.
    AtomDB(AtomDBError),

    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// An error related to BCP.
    BCP(BCPError),

    /// The attempted action could not be completed given the state of the
    /// context.
    InvalidState,
}

/// An error during conflict analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution failed to terminate with an asserting clause.
    NoAssertion,

    /// Analysis was requested without a conflict having been noted.
    MissingConflict,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// An error from the atom database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,

    /// An atom was requested while a decision is current.
    DecisionMade,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(CLiteral, Reason),
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Noted errors when building a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable clause.
    Unsatisfiable,

    /// An atom outside the language of the context.
    UnknownAtom,

    /// Optimization levels must be sized before soft literals are added.
    MissingLevel,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseDBError {
    /// A stored cluase is missing.
    Missing,

    /// An invalid key token.
    InvalidKeyToken,

    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// All possible keys have been used for some clause type.
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}
