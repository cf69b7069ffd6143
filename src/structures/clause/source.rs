/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause given to the context from outside.
    Original,

    /// A clause derived via resolution during conflict analysis.
    Resolution,

    /// A loop formula derived by an unfounded-set check.
    LoopFormula,

    /// A clause imported from another solver over the transfer channel.
    Import,
}
