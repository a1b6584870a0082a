//! Agent intents — the changes a module requests for its agent.

use cs_core::Point3;

/// A change that a module wants applied to its own agent this step.
///
/// Intents are produced by [`BehaviorModule::run`][crate::BehaviorModule::run]
/// and applied by the scheduler after every snapshot agent has been
/// processed, in ascending agent-id order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Add `delta` to the agent's volume (diameter follows the sphere
    /// formula).
    ChangeVolume(f64),

    /// Displace the agent by this vector (clamped to the domain bounds).
    Translate(Point3),

    /// Split the agent: it continues as one daughter and a new agent is
    /// registered as the other, visible from the next step on.
    Divide,

    /// Retire the agent.  Its modules are dropped and it is never visited
    /// again.  Nothing after a `Remove` is applied.
    Remove,
}
