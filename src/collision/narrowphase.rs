use std::time::Duration;

use glam::Vec3;

use crate::{
    config::DEFAULT_EPSILON,
    core::{CollisionMesh, CollisionPacket, CollisionType, Plane},
    utils::{
        math::{is_point_in_triangle, lowest_root},
        profiling::{DetectionStats, ScopedTimer},
    },
};

/// How a single triangle test ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// The triangle faces away from the motion.
    Culled,
    /// The sweep never comes within reach of the triangle plane.
    EarlyOut,
    /// The sweep crosses the plane slab but misses face, corners and edges.
    Miss,
    /// A contact candidate was found (it may still lose to a nearer one).
    Hit,
}

/// Swept unit-sphere vs triangle test run in ellipsoid space.
///
/// The detector holds no per-query state, so one instance can serve any
/// number of packets concurrently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetector {
    epsilon: f32,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Tolerance below which `normal·direction` counts as moving parallel to a plane.
    pub fn with_epsilon(epsilon: f32) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Sweeps the packet against every triangle of `mesh` and keeps the
    /// earliest contact. Returns whether anything was hit.
    pub fn detect(&self, mesh: &CollisionMesh, packet: &mut CollisionPacket) -> bool {
        let mut stats = DetectionStats::default();
        self.detect_with_stats(mesh, packet, &mut stats)
    }

    /// Like [`detect`](Self::detect), overwriting `stats` with counters for this call.
    pub fn detect_with_stats(
        &self,
        mesh: &CollisionMesh,
        packet: &mut CollisionPacket,
        stats: &mut DetectionStats,
    ) -> bool {
        self.sweep(mesh.triangles(), mesh.is_clockwise(), packet, stats)
    }

    /// Sweeps only the triangles listed in `candidates`, e.g. the output of a
    /// broad phase. Out-of-range indices are ignored.
    pub fn detect_candidates(
        &self,
        mesh: &CollisionMesh,
        candidates: &[usize],
        packet: &mut CollisionPacket,
        stats: &mut DetectionStats,
    ) -> bool {
        let triangles = candidates.iter().filter_map(|&i| mesh.triangle(i));
        self.sweep(triangles, mesh.is_clockwise(), packet, stats)
    }

    fn sweep(
        &self,
        triangles: impl Iterator<Item = [Vec3; 3]>,
        clockwise: bool,
        packet: &mut CollisionPacket,
        stats: &mut DetectionStats,
    ) -> bool {
        stats.reset();
        packet.reset_result();

        // A motionless sphere cannot start a sweep.
        if packet.e_velocity().length_squared() == 0.0 {
            return false;
        }

        let inv_radius = packet.inv_radius();
        let mut elapsed = Duration::ZERO;
        {
            let _timer = ScopedTimer::new(&mut elapsed);
            for [p1, p2, p3] in triangles {
                // Non-uniform scaling changes plane orientation, so the plane is
                // rebuilt from the scaled corners instead of reusing the mesh plane.
                let (p1, p2, p3) = (p1 * inv_radius, p2 * inv_radius, p3 * inv_radius);
                let plane = Plane::from_triangle(p1, p2, p3, clockwise);

                stats.processed += 1;
                match self.collide_triangle(packet, p1, p2, p3, &plane) {
                    TriangleOutcome::Culled => stats.culled += 1,
                    TriangleOutcome::EarlyOut => stats.early_out += 1,
                    TriangleOutcome::Miss => {}
                    TriangleOutcome::Hit => stats.hits += 1,
                }
            }
        }
        stats.elapsed = elapsed;

        packet.found_collision()
    }

    /// Tests one ellipsoid-space triangle against the packet's unit sphere and
    /// records the contact if it is nearer than what the packet already holds.
    pub fn collide_triangle(
        &self,
        packet: &mut CollisionPacket,
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        plane: &Plane,
    ) -> TriangleOutcome {
        if !plane.is_front_facing(packet.e_normalized_velocity()) {
            return TriangleOutcome::Culled;
        }

        let base = packet.e_position();
        let velocity = packet.e_velocity();
        let signed_distance = plane.distance(base);
        let normal_dot_velocity = plane.normal.dot(velocity);

        // Parallel is judged on the direction only; slow motion into the plane still
        // goes through the interval test.
        let approach = plane.normal.dot(packet.e_normalized_velocity());
        let (t0, embedded) = if approach.abs() < self.epsilon {
            if signed_distance.abs() >= 1.0 {
                return TriangleOutcome::EarlyOut;
            }
            (0.0, true)
        } else {
            let mut t0 = (-1.0 - signed_distance) / normal_dot_velocity;
            let mut t1 = (1.0 - signed_distance) / normal_dot_velocity;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > 1.0 || t1 < 0.0 {
                return TriangleOutcome::EarlyOut;
            }
            (t0.clamp(0.0, 1.0), false)
        };

        let mut best: Option<(f32, Vec3, CollisionType)> = None;

        if embedded {
            let projected = plane.project(base);
            if is_point_in_triangle(projected, p1, p2, p3) {
                best = Some((0.0, projected, CollisionType::Embedded));
            }
        } else {
            let plane_point = base - plane.normal + velocity * t0;
            if is_point_in_triangle(plane_point, p1, p2, p3) {
                best = Some((t0, plane_point, CollisionType::Plane));
            }
        }

        if best.is_none() {
            best = sweep_features(base, velocity, p1, p2, p3);
        }

        match best {
            Some((t, point, kind)) => {
                packet.record_contact(t, point, kind, *plane);
                TriangleOutcome::Hit
            }
            None => TriangleOutcome::Miss,
        }
    }
}

/// Earliest contact of the swept unit sphere with the corners or edges of a
/// triangle within `[0, 1)`.
fn sweep_features(
    base: Vec3,
    velocity: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
) -> Option<(f32, Vec3, CollisionType)> {
    let mut t = 1.0;
    let mut best = None;
    let velocity_sq = velocity.length_squared();

    for vertex in [p1, p2, p3] {
        let a = velocity_sq;
        let b = 2.0 * velocity.dot(base - vertex);
        let c = (vertex - base).length_squared() - 1.0;
        if let Some(root) = lowest_root(a, b, c, t) {
            t = root;
            best = Some((root, vertex, CollisionType::Vertex));
        }
    }

    for (start, end) in [(p1, p2), (p2, p3), (p3, p1)] {
        let edge = end - start;
        let base_to_vertex = start - base;
        let edge_sq = edge.length_squared();
        let edge_dot_velocity = edge.dot(velocity);
        let edge_dot_base_to_vertex = edge.dot(base_to_vertex);

        // Sphere center at distance 1 from the infinite line through the edge.
        let a = edge_sq * -velocity_sq + edge_dot_velocity * edge_dot_velocity;
        let b = edge_sq * (2.0 * velocity.dot(base_to_vertex))
            - 2.0 * edge_dot_velocity * edge_dot_base_to_vertex;
        let c = edge_sq * (1.0 - base_to_vertex.length_squared())
            + edge_dot_base_to_vertex * edge_dot_base_to_vertex;

        if let Some(root) = lowest_root(a, b, c, t) {
            let f = (edge_dot_velocity * root - edge_dot_base_to_vertex) / edge_sq;
            if (0.0..=1.0).contains(&f) {
                t = root;
                best = Some((root, start + edge * f, CollisionType::Edge));
            }
        }
    }

    best
}
