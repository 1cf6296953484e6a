//! Additional math helpers layered on top of `glam`.

use glam::Vec3;

/// Lowest root of `a·x² + b·x + c = 0` within `[0, max)`.
///
/// Returns `None` for a negative discriminant, a vanishing leading
/// coefficient, or when neither root falls inside the range. A zero
/// discriminant (tangential contact) yields the double root.
pub fn lowest_root(a: f32, b: f32, c: f32, max: f32) -> Option<f32> {
    if a == 0.0 {
        return None;
    }
    let det = b * b - 4.0 * a * c;
    if det.is_nan() || det < 0.0 {
        return None;
    }

    let sqrt_d = det.sqrt();
    let inv = 1.0 / (2.0 * a);
    let mut r1 = (-b - sqrt_d) * inv;
    let mut r2 = (-b + sqrt_d) * inv;
    if r1 > r2 {
        std::mem::swap(&mut r1, &mut r2);
    }

    [r1, r2]
        .into_iter()
        .find(|r| !r.is_nan() && *r >= 0.0 && *r < max)
}

/// Barycentric inside test. Assumes `point` lies on the triangle's plane;
/// points on an edge count as inside. Zero-area triangles contain nothing.
pub fn is_point_in_triangle(point: Vec3, t1: Vec3, t2: Vec3, t3: Vec3) -> bool {
    let v0 = t3 - t1;
    let v1 = t2 - t1;
    let v2 = point - t1;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return false;
    }

    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}

/// Component-wise reciprocal, used to map world space into ellipsoid space.
#[inline]
pub fn reciprocal(v: Vec3) -> Vec3 {
    Vec3::ONE / v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_root_picks_smaller_root_in_range() {
        // (x - 0.25)(x - 0.75)
        let root = lowest_root(1.0, -1.0, 0.1875, 1.0).unwrap();
        assert!((root - 0.25).abs() < 1e-6);

        // The smaller root is negative, so the larger one wins.
        let root = lowest_root(1.0, 0.5, -0.375, 1.0).unwrap();
        assert!((root - 0.411_437_8).abs() < 1e-5);
    }

    #[test]
    fn lowest_root_rejects_out_of_range_and_complex() {
        assert!(lowest_root(1.0, 0.0, 1.0, 1.0).is_none());
        assert!(lowest_root(1.0, -3.0, 2.0, 0.5).is_none());
        assert!(lowest_root(0.0, 2.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn lowest_root_accepts_tangential_contact() {
        // (x - 0.5)^2 has discriminant exactly zero.
        let root = lowest_root(1.0, -1.0, 0.25, 1.0).unwrap();
        assert_eq!(root, 0.5);
    }

    #[test]
    fn point_in_triangle_includes_edges() {
        let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(is_point_in_triangle(Vec3::new(0.25, 0.25, 0.0), a, b, c));
        assert!(is_point_in_triangle(Vec3::new(0.5, 0.0, 0.0), a, b, c));
        assert!(!is_point_in_triangle(Vec3::new(0.75, 0.75, 0.0), a, b, c));
        assert!(!is_point_in_triangle(Vec3::ZERO, a, b, b));
    }
}
