/// Variants of the restart policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Restart when the count of conflicts since the last restart exceeds the
    /// current element of the luby sequence scaled by a constant.
    Luby,

    /// Restart when the average block distance over a bounded window of
    /// recent conflicts exceeds the running mean, with restarts blocked while
    /// the trail grows unusually long relative to its own window.
    BlockDistance,
}

/// Parameters of the block-distance restart policy.
#[derive(Clone, Debug)]
pub struct BlockDistanceRestartConfig {
    /// The bound of the window of recent block distances.
    pub lbd_window: usize,

    /// The bound of the window of recent trail lengths.
    pub trail_window: usize,

    /// Restart when (window average × k) exceeds the running mean.
    pub k: f64,

    /// Block restarts when the trail exceeds (window average × r).
    pub r: f64,

    /// The count of conflicts before blocking is considered.
    pub blocking_delay: usize,
}

impl Default for BlockDistanceRestartConfig {
    fn default() -> Self {
        BlockDistanceRestartConfig {
            lbd_window: 50,
            trail_window: 5000,
            k: 0.8,
            r: 1.4,
            blocking_delay: 10_000,
        }
    }
}
