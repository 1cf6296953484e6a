//! Continuous collision detection for moving ellipsoids against triangle meshes.
//!
//! A moving ellipsoid is swept against a static triangle soup: the query is
//! mapped into ellipsoid space, where the ellipsoid is a unit sphere, and the
//! earliest face, vertex or edge contact along the motion is reported. A
//! response strategy then turns the contact into corrected motion so callers
//! can slide along obstacles instead of stopping or tunnelling.
//!
//! ```no_run
//! use ellipsoid_sweep::{CollisionDetector, CollisionMesh, CollisionPacket, Vec3};
//!
//! let mesh = CollisionMesh::from_points(
//!     &[Vec3::new(-10.0, -10.0, 0.0), Vec3::new(10.0, -10.0, 0.0), Vec3::new(0.0, 10.0, 0.0)],
//!     None,
//!     false,
//! )?;
//! let mut packet = CollisionPacket::sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -10.0), 1.0)?;
//! assert!(CollisionDetector::new().detect(&mesh, &mut packet));
//! # Ok::<(), ellipsoid_sweep::CollisionError>(())
//! ```

pub mod collider;
pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use glam::Vec3;

pub use collider::{EllipsoidCollider, SweepResult};
pub use collision::{
    detect_all, BounceResponse, CollisionDetector, CollisionResponse, RayHit, SlideResponse,
    TriangleOutcome,
};
pub use config::CollisionConfig;
pub use core::{
    Aabb, CollisionMesh, CollisionPacket, CollisionType, Contact, DegeneratePolicy, MeshBuilder,
    Plane, PlaneSide, Ray, Segment, Sphere, VertexLayout,
};
pub use error::CollisionError;
pub use utils::DetectionStats;
