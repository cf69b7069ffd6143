//! Reports from a context about a solve.

/// A report on the satisfiability of the formula of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The formula is coherent --- some model was found.
    Coherent,

    /// The formula is incoherent, perhaps relative to a collection of
    /// assumptions.
    Incoherent,

    /// Satisfiability was not established, e.g. as some budget was exhausted.
    Unknown,
}

impl Report {
    /// The conventional process exit code of the report.
    pub fn exit_code(&self) -> u8 {
        match self {
            Report::Coherent => 10,
            Report::Incoherent => 20,
            Report::Unknown => 0,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coherent => write!(f, "COHERENT"),
            Self::Incoherent => write!(f, "INCOHERENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A report from the optimization driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptimizeReport {
    /// An optimum model was found, with the given lexicographic cost vector.
    Optimum(Vec<u64>),

    /// The hard fragment of the formula is incoherent.
    Incoherent,

    /// Some budget was exhausted; the vector holds the best costs found per
    /// level, for the levels a model was found on.
    Unknown(Vec<u64>),
}

impl OptimizeReport {
    /// The conventional process exit code of the report.
    pub fn exit_code(&self) -> u8 {
        match self {
            OptimizeReport::Optimum(_) => 30,
            OptimizeReport::Incoherent => 20,
            OptimizeReport::Unknown(_) => 0,
        }
    }
}
