use nalgebra::Unit;

use crate::geometry::{EPSILON, Hit, Ray, WorldPoint};

use super::Triangle;

impl Triangle<WorldPoint> {
    /// Calculates ray intersection with the (two sided) triangle.
    ///
    /// Intersects the ray with the triangle's plane and accepts the point if all its
    /// barycentric weights are at least `-EPSILON`, so that hits on shared edges are not lost.
    /// Rays parallel to the plane, degenerate triangles and zero length rays never hit.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let direction = ray.unit_direction()?.into_inner();
        let normal = self.normal().try_normalize(EPSILON)?;

        let denominator = direction.dot(&normal);
        if denominator.abs() < EPSILON {
            return None;
        }

        let t = (self[2] - ray.origin).dot(&normal) / denominator;
        let point = ray.origin + direction * t;

        if !self.barycentric(&point)?.is_inside(EPSILON) {
            return None;
        }

        Hit::facing(&direction, t, point, Unit::new_unchecked(normal))
    }
}
