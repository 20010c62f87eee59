// Fleet-level counters

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub active_count: usize,
    pub primary_active_count: usize,
    pub secondary_active_count: usize,
    /// Cumulative over every sample in the window, not a point-in-time gauge.
    pub failure_count: usize,
}
