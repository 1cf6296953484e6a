use std::ops::AddAssign;
use std::time::{Duration, Instant};

use log::debug;

/// Per-call counters describing how the detector spent its triangle budget.
///
/// Purely diagnostic; correctness never depends on them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetectionStats {
    /// Triangles handed to the triangle test.
    pub processed: usize,
    /// Triangles rejected because they face away from the motion.
    pub culled: usize,
    /// Triangles rejected by the plane-interval test.
    pub early_out: usize,
    /// Triangles that produced any contact candidate.
    pub hits: usize,
    pub elapsed: Duration,
}

impl DetectionStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        debug!(
            "detection: {} processed, {} culled, {} early-out, {} hits in {} µs",
            self.processed,
            self.culled,
            self.early_out,
            self.hits,
            self.elapsed.as_micros()
        );
    }
}

impl AddAssign for DetectionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.processed += rhs.processed;
        self.culled += rhs.culled;
        self.early_out += rhs.early_out;
        self.hits += rhs.hits;
        self.elapsed += rhs.elapsed;
    }
}

/// Adds the lifetime of the guard to `output`.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
