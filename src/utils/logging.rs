use log::{log_enabled, trace, warn, Level};
use std::time::Instant;

/// Traces the start and end of a labelled section.
pub struct TraceSpan<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> TraceSpan<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TraceSpan<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            trace!("end {} ({} µs)", self.label, self.start.elapsed().as_micros());
        }
    }
}

/// Warns when the slide loop gives up with motion left over.
pub fn warn_if_iterations_exhausted(iterations: u32, max_iterations: u32, remaining_speed: f32) {
    if iterations >= max_iterations && remaining_speed > 0.0 {
        warn!(
            "collide-and-slide stopped after {iterations} iterations with {remaining_speed:.4} units of motion left"
        );
    }
}
