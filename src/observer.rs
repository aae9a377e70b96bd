//! Step observer trait for watching the phases of a tick.

/// Hooks called as a tick progresses. All methods default to no-ops.
///
/// Useful for debugging, visualization, or profiling.
pub trait StepObserver {
    /// Called after gravity and wind have been accumulated into predicted velocities.
    fn on_forces_applied(&mut self) {}

    /// Called after predicted positions have been integrated.
    fn on_predict(&mut self) {}

    /// Called after each relaxation pass over all constraints.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called once the tick has been committed.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
