//! Global configuration constants for the ellipsoid sweep.

use serde::{Deserialize, Serialize};

/// Tolerance used when classifying a sweep as parallel to a triangle plane.
pub const DEFAULT_EPSILON: f32 = 1e-5;

/// Separation kept between the ellipsoid and a surface after a response (world units).
pub const DEFAULT_DISPLACEMENT_DISTANCE: f32 = 0.005;

/// Upper bound of detect/respond rounds per collide-and-slide call.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Remaining world-space velocity below which the slide loop stops.
pub const DEFAULT_MIN_VELOCITY: f32 = 1e-4;

/// Tunables for detection and the collide-and-slide loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub epsilon: f32,
    pub displacement_distance: f32,
    pub max_iterations: u32,
    pub min_velocity: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            displacement_distance: DEFAULT_DISPLACEMENT_DISTANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_velocity: DEFAULT_MIN_VELOCITY,
        }
    }
}

impl CollisionConfig {
    pub fn with_displacement_distance(mut self, distance: f32) -> Self {
        self.displacement_distance = distance.max(0.0);
        self
    }

    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.abs();
        self
    }
}
