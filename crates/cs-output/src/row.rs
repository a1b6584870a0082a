//! Plain data row types written by output backends.

/// One live cell at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        f64,
    pub y:        f64,
    pub z:        f64,
    pub diameter: f64,
}

/// Population counters for one completed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub tick:      u64,
    /// Reporting hours elapsed once the step has completed.
    pub hours:     f64,
    pub live:      u64,
    pub divisions: u64,
    pub removals:  u64,
}
