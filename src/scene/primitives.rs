use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Hit, Ray, Triangle, WorldPoint};

use super::{Object, material::MaterialIdx};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
}

impl Object for Sphere {
    /// Only the near root of the ray/sphere equation is considered, rays starting inside
    /// the sphere don't hit it.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if !(self.radius > 0.0) {
            return None;
        }
        let direction = ray.unit_direction()?.into_inner();

        let to_center = self.center - ray.origin;
        let b = to_center.dot(&direction);
        let discriminant = b * b - to_center.norm_squared() + self.radius * self.radius;

        if discriminant < 0.0 {
            return None;
        }

        let t = b - discriminant.sqrt();
        let point = ray.origin + direction * t;
        let normal = Unit::try_new(point - self.center, EPSILON)?;

        Hit::facing(&direction, t, point, normal)
    }
}

impl Object for Triangle<WorldPoint> {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        Triangle::intersect(self, ray)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle<WorldPoint>),
}

impl Shape {
    /// Describes why the shape can't be rendered, if it can't.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Sphere(sphere) => {
                if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                    return Err(format!("radius {} must be positive", sphere.radius));
                }
                if !sphere.center.coords.iter().all(|c| c.is_finite()) {
                    return Err("center must be finite".to_string());
                }
            }
            Shape::Triangle(triangle) => {
                if !triangle.iter().all(|p| p.coords.iter().all(|c| c.is_finite())) {
                    return Err("vertices must be finite".to_string());
                }
                if triangle.is_degenerate() {
                    return Err("vertices are collinear".to_string());
                }
            }
        }
        Ok(())
    }
}

impl Object for Shape {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
        }
    }
}

/// Shape with a resolved material.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub shape: Shape,
    pub material: MaterialIdx,
    pub name: Option<String>,
}

impl Surface {
    /// Name of the surface for messages, falls back to its position in the scene.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        }
    }
}

impl Object for Surface {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.shape.intersect(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{
        WorldVector,
        test::{NonzeroWorldVectorWrapper, WorldPointWrapper},
    };
    use assert2::{assert, let_assert};
    use test_strategy::proptest;

    #[test]
    fn test_direct_hit_through_center() {
        let sphere = Sphere {
            center: [1.0, 2.0, 3.0].into(),
            radius: 1.0,
        };
        let ray = Ray::new([1.0, 2.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = sphere.intersect(&ray);

        let h = hit.expect("We should have a hit!");
        assert!((h.distance - 2.0).abs() < 1e-6);
        assert!((h.normal.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_grazing_hit() {
        let sphere = Sphere {
            center: [1.0, 2.0, 3.0].into(),
            radius: 1.0,
        };
        let ray = Ray::new([2.0, 2.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = sphere.intersect(&ray);

        let h = hit.expect("We should have a hit!");
        assert!((h.distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_narrow_miss() {
        let sphere = Sphere {
            center: [1.0, 2.0, 3.0].into(),
            radius: 1.0,
        };
        let ray = Ray::new([2.0, 2.01, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = sphere.intersect(&ray);
        assert!(hit.is_none());
    }

    #[test]
    fn unnormalized_direction_gives_same_hit() {
        let sphere = Sphere {
            center: [0.0, 0.0, 0.0].into(),
            radius: 1.0,
        };
        let short = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, -0.1].into());
        let long = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, -30.0].into());

        let_assert!(Some(a) = sphere.intersect(&short));
        let_assert!(Some(b) = sphere.intersect(&long));
        assert!((a.distance - b.distance).abs() < 1e-6);
        assert!((a.point - WorldPoint::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn sphere_behind_ray_is_miss() {
        let sphere = Sphere {
            center: [0.0, 0.0, 0.0].into(),
            radius: 1.0,
        };
        let ray = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_is_miss() {
        let sphere = Sphere {
            center: [0.0, 0.0, 0.0].into(),
            radius: 1.0,
        };
        let ray = Ray::new([0.0, 0.0, 0.0].into(), [0.0, 1.0, 0.0].into());
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn zero_radius_is_miss() {
        let sphere = Sphere {
            center: [0.0, 0.0, 0.0].into(),
            radius: 0.0,
        };
        let ray = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, -1.0].into());
        assert!(sphere.intersect(&ray).is_none());
        assert!(Shape::Sphere(sphere).validate().is_err());
    }

    #[proptest]
    fn head_on_hit_distance_and_normal(
        center: WorldPointWrapper,
        #[strategy(0.5f32..10.0)] radius: FloatType,
        #[strategy(0.1f32..20.0)] gap: FloatType,
        direction: NonzeroWorldVectorWrapper,
    ) {
        let to_origin = direction.normalize() * (radius + gap);
        let origin = *center + to_origin;
        let sphere = Sphere {
            center: *center,
            radius,
        };

        let_assert!(Some(hit) = sphere.intersect(&Ray::new(origin, -to_origin)));

        assert!((hit.distance - gap).abs() < 1e-3 * (1.0 + gap));
        // Hits from outside the sphere always have outward normals
        assert!(hit.normal.dot(&(hit.point - *center)) > 0.0);
    }

    #[proptest]
    fn passing_ray_is_miss(
        center: WorldPointWrapper,
        #[strategy(0.5f32..10.0)] radius: FloatType,
        direction: NonzeroWorldVectorWrapper,
    ) {
        let direction = direction.normalize();
        // Offset perpendicular to the direction, further than the radius
        let side = if direction.x.abs() < 0.9 {
            direction.cross(&WorldVector::x())
        } else {
            direction.cross(&WorldVector::y())
        };
        let origin = *center + side.normalize() * (radius * 1.5 + 0.1) - direction * 10.0;
        let sphere = Sphere {
            center: *center,
            radius,
        };
        assert!(sphere.intersect(&Ray::new(origin, direction)).is_none());
    }

    #[test]
    fn collinear_triangle_is_invalid() {
        let shape = Shape::Triangle(Triangle::new(
            [0.0, 0.0, 0.0].into(),
            [1.0, 1.0, 0.0].into(),
            [3.0, 3.0, 0.0].into(),
        ));
        assert!(shape.validate().is_err());
    }

    #[test]
    fn shape_dispatches_to_triangle() {
        let shape = Shape::Triangle(Triangle::new(
            [-1.0, -1.0, 0.0].into(),
            [1.0, -1.0, 0.0].into(),
            [0.0, 1.0, 0.0].into(),
        ));
        assert!(shape.validate().is_ok());
        let ray = Ray::new([0.0, 0.0, 1.0].into(), [0.0, 0.0, -1.0].into());
        let_assert!(Some(hit) = shape.intersect(&ray));
        assert!((hit.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn label_falls_back_to_index() {
        let mut surface = Surface {
            shape: Shape::Sphere(Sphere {
                center: [0.0, 0.0, 0.0].into(),
                radius: 1.0,
            }),
            material: MaterialIdx::new(0),
            name: None,
        };
        assert!(surface.label(3) == "#3");
        surface.name = Some("ball".to_string());
        assert!(surface.label(3) == "ball");
    }
}
