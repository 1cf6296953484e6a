use glam::Vec3;

use crate::core::{CollisionPacket, Plane};

/// Strategy that turns a detected contact into corrected motion.
///
/// Implementations rewrite the packet's position and velocity (keeping both
/// spaces consistent) so the caller can run detection again with what is
/// left of the motion. Packets without a contact are left untouched.
pub trait CollisionResponse: Send + Sync {
    /// `displacement_distance` is the separation to keep from the surface,
    /// in the same units as the ellipsoid radii.
    fn respond(&self, packet: &mut CollisionPacket, displacement_distance: f32);
}

/// Stops at the contact and slides the remaining motion along the obstacle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlideResponse;

impl SlideResponse {
    pub fn new() -> Self {
        Self
    }
}

impl CollisionResponse for SlideResponse {
    fn respond(&self, packet: &mut CollisionPacket, displacement_distance: f32) {
        if !packet.found_collision() {
            return;
        }

        let destination = packet.e_position() + packet.e_velocity();
        let (new_base, intersection) = stop_at_contact(packet, displacement_distance);

        // The sliding plane faces the stopped sphere center rather than using the
        // triangle plane, which keeps corners and edges from snagging.
        let slide_normal = (new_base - intersection).normalize_or_zero();
        let new_velocity = if slide_normal == Vec3::ZERO {
            Vec3::ZERO
        } else {
            let sliding_plane = Plane::from_point_normal(intersection, slide_normal);
            let new_destination = destination - slide_normal * sliding_plane.distance(destination);
            new_destination - intersection
        };

        packet.intersection_point = intersection;
        packet.set_ellipsoid_motion(new_base, new_velocity);
    }
}

/// Stops at the contact and reflects the remaining motion off the surface.
#[derive(Debug, Clone, Copy)]
pub struct BounceResponse {
    /// Fraction of the normal motion kept after the bounce; `0` slides, `1` is elastic.
    pub restitution: f32,
}

impl Default for BounceResponse {
    fn default() -> Self {
        Self { restitution: 0.5 }
    }
}

impl BounceResponse {
    pub fn new(restitution: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
        }
    }
}

impl CollisionResponse for BounceResponse {
    fn respond(&self, packet: &mut CollisionPacket, displacement_distance: f32) {
        if !packet.found_collision() {
            return;
        }

        let destination = packet.e_position() + packet.e_velocity();
        let (new_base, intersection) = stop_at_contact(packet, displacement_distance);
        let normal = (new_base - intersection).normalize_or_zero();

        let remaining = destination - new_base;
        let into_surface = remaining.dot(normal);
        let new_velocity = if into_surface < 0.0 {
            let normal_part = normal * into_surface;
            (remaining - normal_part) - normal_part * self.restitution
        } else {
            remaining
        };

        packet.intersection_point = intersection;
        packet.set_ellipsoid_motion(new_base, new_velocity);
    }
}

/// Ellipsoid-space stopping position and backed-off contact point.
///
/// The world-space separation is mapped with the smallest radius, the
/// direction in which one ellipsoid unit is shortest in the world.
fn stop_at_contact(packet: &CollisionPacket, displacement_distance: f32) -> (Vec3, Vec3) {
    let separation = displacement_distance / packet.radius().min_element();
    let base = packet.e_position();
    let intersection = packet.intersection_point();

    if packet.nearest_distance() == 0.0 {
        let plane = packet.plane();
        let penetration = plane.distance(base);
        let pushed = base + plane.normal * (1.0 - penetration + separation);
        return (pushed, intersection);
    }

    let direction = packet.e_normalized_velocity();
    let new_base = base + direction * (packet.nearest_distance() - separation);
    (new_base, intersection - direction * separation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collision::narrowphase::CollisionDetector, core::CollisionMesh};

    fn floor() -> CollisionMesh {
        CollisionMesh::from_points(
            &[
                Vec3::new(-20.0, -20.0, 0.0),
                Vec3::new(20.0, -20.0, 0.0),
                Vec3::new(0.0, 20.0, 0.0),
            ],
            None,
            false,
        )
        .unwrap()
    }

    #[test]
    fn head_on_slide_stops_above_surface() {
        let mesh = floor();
        let mut packet =
            CollisionPacket::sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -10.0), 1.0)
                .unwrap();
        assert!(CollisionDetector::new().detect(&mesh, &mut packet));

        SlideResponse.respond(&mut packet, 0.01);

        assert!((packet.position().z - 1.01).abs() < 1e-4);
        assert!(packet.velocity().length() < 1e-4);
        assert!((packet.intersection_point().z - 0.01).abs() < 1e-4);
    }

    #[test]
    fn oblique_slide_keeps_tangential_motion() {
        let mesh = floor();
        let mut packet =
            CollisionPacket::sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::new(4.0, 0.0, -8.0), 1.0)
                .unwrap();
        assert!(CollisionDetector::new().detect(&mesh, &mut packet));

        SlideResponse.respond(&mut packet, 0.01);

        assert!(packet.position().z > 1.0);
        assert!(packet.velocity().z.abs() < 1e-4);
        assert!(packet.velocity().x > 1.9 && packet.velocity().x < 2.1);
    }

    #[test]
    fn embedded_contact_is_pushed_out() {
        let mesh = floor();
        let mut packet =
            CollisionPacket::sphere(Vec3::new(0.0, 0.0, 0.5), Vec3::new(1.0, 0.0, -1e-7), 1.0)
                .unwrap();
        assert!(CollisionDetector::new().detect(&mesh, &mut packet));
        assert_eq!(packet.nearest_distance(), 0.0);

        SlideResponse.respond(&mut packet, 0.02);

        assert!((packet.position().z - 1.02).abs() < 1e-4);
        assert!(packet.velocity().x > 0.99);
    }

    #[test]
    fn bounce_reflects_normal_motion() {
        let mesh = floor();
        let mut packet =
            CollisionPacket::sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -10.0), 1.0)
                .unwrap();
        assert!(CollisionDetector::new().detect(&mesh, &mut packet));

        BounceResponse::new(1.0).respond(&mut packet, 0.0);

        assert!((packet.position().z - 1.0).abs() < 1e-4);
        assert!((packet.velocity() - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-3);
    }

    #[test]
    fn responses_ignore_packets_without_contact() {
        let mut packet = CollisionPacket::sphere(Vec3::ONE, Vec3::X, 1.0).unwrap();
        SlideResponse.respond(&mut packet, 0.1);
        BounceResponse::default().respond(&mut packet, 0.1);
        assert_eq!(packet.position(), Vec3::ONE);
        assert_eq!(packet.velocity(), Vec3::X);
    }
}
