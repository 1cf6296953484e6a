//! Collision modules: narrow-phase sweep, responses, intersection queries, batch detection.

pub mod narrowphase;
pub mod response;
pub mod queries;
pub mod parallel;

pub use narrowphase::{CollisionDetector, TriangleOutcome};
pub use response::{BounceResponse, CollisionResponse, SlideResponse};
pub use queries::RayHit;
pub use parallel::detect_all;
