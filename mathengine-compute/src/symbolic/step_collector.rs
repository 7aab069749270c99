use std::fmt::Debug;
use tracing::trace;

/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when you don't
/// want to know the steps taken by an algorithm.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}

/// A collector that does not keep the steps, but emits a `trace` event for each of them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceCollector;

impl<S: Debug> StepCollector<S> for TraceCollector {
    fn push(&mut self, step: S) {
        trace!(target: "mathengine::simplify", ?step, "rule applied");
    }
}
