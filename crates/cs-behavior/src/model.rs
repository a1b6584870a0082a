//! The `BehaviorModule` trait — the main extension point for user code.

use cs_core::ModuleRng;

use crate::{BehaviorResult, CellView, CopyEvent, Intent, StepContext};

/// Pluggable per-agent, per-step update logic with persistent local state.
///
/// One instance is attached to one agent.  The registry pairs it with its own
/// [`ModuleRng`], seeded once at attachment, and hands that stream back on
/// every call.
///
/// # Required methods
///
/// [`run`][Self::run], [`replicate`][Self::replicate], [`name`][Self::name]
/// and [`steps`][Self::steps].  The mother-side event hook and the capability
/// accessors have defaults.
///
/// # Thread safety
///
/// With the `parallel` feature of cs-sim, `run` is called for many agents
/// at once, each on its own module instance, so implementations must be
/// `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// struct Shrink { steps: u64 }
///
/// impl BehaviorModule for Shrink {
///     fn name(&self) -> &'static str { "shrink" }
///     fn steps(&self) -> u64 { self.steps }
///     fn run(&mut self, cell: &CellView, _ctx: &StepContext<'_>, _rng: &mut ModuleRng)
///         -> BehaviorResult<Vec<Intent>>
///     {
///         self.steps += 1;
///         Ok(if cell.diameter > 2.0 { vec![Intent::ChangeVolume(-1.0)] } else { vec![Intent::Remove] })
///     }
///     fn replicate(&self, _event: CopyEvent) -> Box<dyn BehaviorModule> {
///         Box::new(Shrink { steps: 0 })
///     }
/// }
/// ```
pub trait BehaviorModule: Send + Sync + 'static {
    /// Short label for logs and reports.
    fn name(&self) -> &'static str;

    /// The module's elapsed-step counter.
    fn steps(&self) -> u64;

    /// Called once per step for the owning agent.
    ///
    /// Return the [`Intent`]s to apply to the agent.  An empty `Vec` means
    /// "no change".  Returning [`Intent::Remove`] stops any later module of
    /// the same agent from running this step.
    fn run(
        &mut self,
        cell: &CellView,
        ctx:  &StepContext<'_>,
        rng:  &mut ModuleRng,
    ) -> BehaviorResult<Vec<Intent>>;

    /// Build the module instance for the new agent created by `event`.
    ///
    /// Must depend only on `self` and `event`.
    fn replicate(&self, event: CopyEvent) -> Box<dyn BehaviorModule>;

    /// Called on the source agent's module after `event` created a copy.
    ///
    /// Default: no change.
    fn on_copied(&mut self, _event: CopyEvent) {}

    /// Capability query for modules that track division capability.
    ///
    /// Default: `None` (the module has no such flag).
    fn can_divide(&self) -> Option<bool> {
        None
    }

    /// Overwrite the division-capability flag, if the module has one.
    ///
    /// Returns `false` (and changes nothing) for modules without the flag.
    fn set_can_divide(&mut self, _can_divide: bool) -> bool {
        false
    }
}
