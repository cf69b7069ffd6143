/// Variants of the VSIDS atom bumping scheme, differing in which atoms are
/// bumped during conflict analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VSIDS {
    /// Bump the atoms in the clause on which resolution began.
    Chaff,

    /// Bump each atom used during resolution.
    MiniSAT,
}
