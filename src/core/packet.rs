use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::types::Plane;
use crate::{
    error::{CollisionError, Result},
    utils::math::reciprocal,
};

/// Feature of the triangle that produced the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Sphere touched the inside of the triangle face.
    Plane,
    /// Sphere touched one of the corners.
    Vertex,
    /// Sphere touched one of the edges.
    Edge,
    /// Sphere already overlapped the face at the start of the sweep.
    Embedded,
}

/// World-space summary of a resolved contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub point: Vec3,
    pub normal: Vec3,
    pub kind: CollisionType,
    /// Distance travelled along the world velocity before touching.
    pub distance: f32,
}

/// Query state for one moving ellipsoid.
///
/// Inputs are given in world space and mirrored into ellipsoid space (world
/// coordinates divided by the radii) where the ellipsoid becomes a unit
/// sphere. Both views are always updated together through [`set`](Self::set).
/// Results are written by the detector, expressed in ellipsoid space, and
/// cleared on every `set` and at the start of every detection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionPacket {
    position: Vec3,
    velocity: Vec3,
    radius: Vec3,
    inv_radius: Vec3,

    e_position: Vec3,
    e_velocity: Vec3,
    e_normalized_velocity: Vec3,

    pub(crate) found_collision: bool,
    pub(crate) nearest_distance: f32,
    pub(crate) time_of_impact: f32,
    pub(crate) intersection_point: Vec3,
    pub(crate) collision_type: Option<CollisionType>,
    pub(crate) plane: Plane,
}

impl CollisionPacket {
    /// Creates a packet for an ellipsoid with semi-axes `radius`.
    ///
    /// Every radius must be finite and strictly positive.
    pub fn new(position: Vec3, velocity: Vec3, radius: Vec3) -> Result<Self> {
        if !radius.is_finite() || radius.min_element() <= 0.0 {
            return Err(CollisionError::InvalidRadius(radius.to_array()));
        }

        let mut packet = Self {
            position,
            velocity,
            radius,
            inv_radius: reciprocal(radius),
            e_position: Vec3::ZERO,
            e_velocity: Vec3::ZERO,
            e_normalized_velocity: Vec3::ZERO,
            found_collision: false,
            nearest_distance: f32::INFINITY,
            time_of_impact: f32::INFINITY,
            intersection_point: Vec3::ZERO,
            collision_type: None,
            plane: Plane::default(),
        };
        packet.set(position, velocity);
        Ok(packet)
    }

    /// Sphere shorthand with equal radii.
    pub fn sphere(position: Vec3, velocity: Vec3, radius: f32) -> Result<Self> {
        Self::new(position, velocity, Vec3::splat(radius))
    }

    /// Moves the packet to a new world-space state and clears previous results.
    pub fn set(&mut self, position: Vec3, velocity: Vec3) {
        self.set_motion(position, velocity);
        self.reset_result();
    }

    /// Updates motion while keeping the last detection result readable.
    pub(crate) fn set_motion(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
        self.e_position = position * self.inv_radius;
        self.e_velocity = velocity * self.inv_radius;
        self.e_normalized_velocity = self.e_velocity.normalize_or_zero();
    }

    pub(crate) fn set_ellipsoid_motion(&mut self, e_position: Vec3, e_velocity: Vec3) {
        self.set_motion(e_position * self.radius, e_velocity * self.radius);
    }

    pub(crate) fn reset_result(&mut self) {
        self.found_collision = false;
        self.nearest_distance = f32::INFINITY;
        self.time_of_impact = f32::INFINITY;
        self.intersection_point = Vec3::ZERO;
        self.collision_type = None;
        self.plane = Plane::default();
    }

    /// Records a contact at sweep fraction `t` if it is strictly nearer than
    /// the current one.
    pub(crate) fn record_contact(
        &mut self,
        t: f32,
        point: Vec3,
        kind: CollisionType,
        plane: Plane,
    ) -> bool {
        let distance = t * self.e_velocity.length();
        if distance.is_nan() || distance >= self.nearest_distance {
            return false;
        }
        self.found_collision = true;
        self.nearest_distance = distance;
        self.time_of_impact = t;
        self.intersection_point = point;
        self.collision_type = Some(kind);
        self.plane = plane;
        true
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn radius(&self) -> Vec3 {
        self.radius
    }

    pub fn inv_radius(&self) -> Vec3 {
        self.inv_radius
    }

    pub fn e_position(&self) -> Vec3 {
        self.e_position
    }

    pub fn e_velocity(&self) -> Vec3 {
        self.e_velocity
    }

    pub fn e_normalized_velocity(&self) -> Vec3 {
        self.e_normalized_velocity
    }

    pub fn found_collision(&self) -> bool {
        self.found_collision
    }

    /// Ellipsoid-space distance travelled before the contact, `+inf` without one.
    pub fn nearest_distance(&self) -> f32 {
        self.nearest_distance
    }

    /// Fraction of the velocity travelled before the contact, `+inf` without one.
    pub fn time_of_impact(&self) -> f32 {
        self.time_of_impact
    }

    /// Contact point in ellipsoid space, on the surface that was hit.
    ///
    /// The ellipsoid center at that moment is [`touch_position`](Self::touch_position).
    pub fn intersection_point(&self) -> Vec3 {
        self.intersection_point
    }

    pub fn collision_type(&self) -> Option<CollisionType> {
        self.collision_type
    }

    /// Plane of the contact triangle in ellipsoid space.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn to_world(&self, e_point: Vec3) -> Vec3 {
        e_point * self.radius
    }

    pub fn to_ellipsoid(&self, point: Vec3) -> Vec3 {
        point * self.inv_radius
    }

    pub fn world_intersection_point(&self) -> Vec3 {
        self.to_world(self.intersection_point)
    }

    /// Contact plane normal mapped back to world space.
    ///
    /// Normals transform with the inverse transpose of the space change, so the
    /// ellipsoid-space normal is scaled by the inverse radii and renormalized.
    pub fn world_contact_normal(&self) -> Vec3 {
        (self.plane.normal * self.inv_radius).normalize_or_zero()
    }

    /// World-space center of the ellipsoid at the moment of contact.
    pub fn touch_position(&self) -> Option<Vec3> {
        self.found_collision
            .then(|| self.position + self.velocity * self.time_of_impact)
    }

    pub fn world_nearest_distance(&self) -> f32 {
        self.time_of_impact * self.velocity.length()
    }

    pub fn contact(&self) -> Option<Contact> {
        let kind = self.collision_type.filter(|_| self.found_collision)?;
        Some(Contact {
            point: self.world_intersection_point(),
            normal: self.world_contact_normal(),
            kind,
            distance: self.world_nearest_distance(),
        })
    }
}
