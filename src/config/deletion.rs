/// Variants of the learned-clause deletion policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Trigger on the count of addition clauses less the trail length
    /// exceeding a geometrically growing threshold; delete the half with the
    /// weakest activity, skipping locked clauses.
    Activity,

    /// Trigger on the count of addition clauses exceeding a per-restart
    /// threshold; delete the half with the widest block distance, protecting
    /// locked clauses, promoted clauses, and those with a block distance of
    /// at most two.
    BlockDistance,
}
