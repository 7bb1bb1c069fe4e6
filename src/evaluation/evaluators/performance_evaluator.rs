use crate::core::instances::Instance;
use crate::evaluation::Measurement;

/// Accumulates classification outcomes and reports summary measurements.
pub trait PerformanceEvaluator {
    fn reset(&mut self);

    /// Records one classified example. `predicted` is `None` when the
    /// classifier could not commit to a class (unknown value, degenerate
    /// evidence); such examples keep their weight in the denominator and
    /// count against accuracy.
    fn add_result(&mut self, example: &dyn Instance, predicted: Option<usize>);

    fn performance(&self) -> Vec<Measurement>;
}
