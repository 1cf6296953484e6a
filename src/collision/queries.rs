use glam::Vec3;

use crate::{
    core::{Aabb, CollisionMesh, Plane, Ray, Segment, Sphere},
    utils::math::is_point_in_triangle,
};

pub use crate::utils::math::lowest_root;

/// Result of a ray query against mesh geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub triangle: usize,
}

/// Intersects a ray with a plane. A ray lying in the plane hits at its origin.
pub fn intersect_ray_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let denom = ray.direction.dot(plane.normal);
    if denom != 0.0 {
        let t = -plane.distance(ray.origin) / denom;
        return (t >= 0.0).then(|| ray.at(t));
    }
    (plane.distance(ray.origin) == 0.0).then_some(ray.origin)
}

/// Intersects a ray with a triangle, from either side.
pub fn intersect_ray_triangle(ray: &Ray, t1: Vec3, t2: Vec3, t3: Vec3) -> Option<Vec3> {
    let plane = Plane::from_points(t1, t2, t3);
    if plane.is_degenerate() {
        return None;
    }
    let point = intersect_ray_plane(ray, &plane)?;
    is_point_in_triangle(point, t1, t2, t3).then_some(point)
}

/// Nearest intersection of the ray with a sphere, or the exit point when the
/// origin is inside.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<(Vec3, f32)> {
    let oc = ray.origin - sphere.center;
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let near = (-b - sqrt_disc) * 0.5;
    let far = (-b + sqrt_disc) * 0.5;
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };
    Some((ray.at(t), t))
}

/// Slab test returning the entry point, entry distance and the face normal hit.
pub fn intersect_ray_aabb(ray: &Ray, bounds: &Aabb, max_distance: f32) -> Option<(Vec3, f32, Vec3)> {
    let mut t_min = 0.0;
    let mut t_max = max_distance;
    let mut normal = Vec3::ZERO;

    for i in 0..3 {
        let origin_component = ray.origin[i];
        let dir_component = ray.direction[i];
        let min = bounds.min[i];
        let max = bounds.max[i];

        if dir_component.abs() < 1e-6 {
            if origin_component < min || origin_component > max {
                return None;
            }
        } else {
            let inv_dir = 1.0 / dir_component;
            let mut t1 = (min - origin_component) * inv_dir;
            let mut t2 = (max - origin_component) * inv_dir;
            let mut axis_normal = Vec3::ZERO;
            axis_normal[i] = -dir_component.signum();

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            if t1 > t_min {
                t_min = t1;
                normal = axis_normal;
            }

            t_max = f32::min(t_max, t2);
            if t_min > t_max {
                return None;
            }
        }
    }

    Some((ray.at(t_min), t_min, normal))
}

/// Point where the segment crosses the plane, if it does.
pub fn intersect_segment_plane(segment: &Segment, plane: &Plane) -> Option<Vec3> {
    let dir = segment.direction();
    let denom = dir.dot(plane.normal);
    if denom == 0.0 {
        return None;
    }
    let t = -plane.distance(segment.start) / denom;
    (0.0..=1.0)
        .contains(&t)
        .then(|| segment.start + dir * t)
}

/// Nearest triangle of `mesh` hit by the ray, reporting the stored mesh plane normal.
pub fn intersect_ray_triangles(ray: &Ray, mesh: &CollisionMesh) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;

    for (index, [t1, t2, t3]) in mesh.triangles().enumerate() {
        let Some(point) = intersect_ray_triangle(ray, t1, t2, t3) else {
            continue;
        };
        let distance = ray.origin.distance(point);
        if best.is_some_and(|hit| hit.distance <= distance) {
            continue;
        }
        let normal = mesh.plane(index).map(|p| p.normal).unwrap_or(Vec3::ZERO);
        best = Some(RayHit {
            point,
            normal,
            distance,
            triangle: index,
        });
    }

    best
}
