//! Core types: geometry primitives, the collision mesh, and the query packet.

pub mod types;
pub mod mesh;
pub mod packet;

pub use types::{Aabb, Plane, PlaneSide, Ray, Segment, Sphere};
pub use mesh::{CollisionMesh, DegeneratePolicy, MeshBuilder, VertexLayout};
pub use packet::{CollisionPacket, CollisionType, Contact};
