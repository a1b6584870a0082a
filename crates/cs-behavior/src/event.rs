//! Copy events — why a module is being cloned onto another agent.

/// The kind of event that creates a new agent from an existing one.
///
/// Passed to [`BehaviorModule::replicate`][crate::BehaviorModule::replicate]
/// so the daughter's state is a pure function of (mother state, event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyEvent {
    /// The source agent divided; the copy is its new daughter.
    CellDivision,

    /// Any other duplication of an agent (host-initiated copies).
    Duplicate,
}
