use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneSide {
    OnPlane,
    Back,
    Front,
}

/// Plane in Hessian normal form: all `p` with `normal·p + d = 0`.
///
/// `normal` is expected to be unit length. Every constructor normalizes; a
/// zero normal only appears for degenerate input and is reported by
/// [`Plane::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Z,
            d: 0.0,
        }
    }
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            d,
        }
    }

    /// Builds the plane through three points. The normal follows the
    /// counter-clockwise order `p1 -> p2 -> p3`.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(p1),
        }
    }

    /// Plane of a triangle honouring the winding of its source mesh.
    pub fn from_triangle(p1: Vec3, p2: Vec3, p3: Vec3, clockwise: bool) -> Self {
        if clockwise {
            Self::from_points(p3, p2, p1)
        } else {
            Self::from_points(p1, p2, p3)
        }
    }

    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn side(&self, point: Vec3) -> PlaneSide {
        let dist = self.distance(point);
        if dist == 0.0 {
            PlaneSide::OnPlane
        } else if dist < 0.0 {
            PlaneSide::Back
        } else {
            PlaneSide::Front
        }
    }

    /// True when something travelling along `direction` approaches the front side.
    #[inline]
    pub fn is_front_facing(&self, direction: Vec3) -> bool {
        self.normal.dot(direction) < 0.0
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance(point)
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal.length_squared() < 0.5
    }
}

/// Half-line starting at `origin`. The direction is stored normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unnormalized direction `end - start`.
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq == 0.0 {
            return self.start;
        }
        let t = ((point - self.start).dot(dir) / len_sq).clamp(0.0, 1.0);
        self.start + dir * t
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.closest_point(point).distance(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn overlaps(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Signed distance from the surface, negative inside.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.center.distance(point) - self.radius
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.center - Vec3::splat(self.radius),
            self.center + Vec3::splat(self.radius),
        )
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any `extend` call turns valid.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = Self::empty();
        for &p in points {
            bounds.extend(p);
        }
        bounds
    }

    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}
