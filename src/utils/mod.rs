//! Utility helpers: math extensions, logging, and detection statistics.

pub mod logging;
pub mod math;
pub mod profiling;

pub use math::*;
pub use profiling::DetectionStats;
