mod ray_triangle_intersection;
mod triangle;

use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

pub use triangle::{BarycentricCoordinates, Triangle};

pub type FloatType = f32;

/// Tolerance used for degenerate geometry checks and for the minimal hit distance.
pub const EPSILON: FloatType = 1e-5;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray, not necessarily normalized.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray { origin, direction }
    }

    /// Normalized direction of the ray, `None` if the direction is (close to) zero.
    pub fn unit_direction(&self) -> Option<Unit<WorldVector>> {
        Unit::try_new(self.direction, EPSILON)
    }

    /// Point at given distance along the normalized direction.
    pub fn point_at(&self, distance: FloatType) -> Option<WorldPoint> {
        self.unit_direction()
            .map(|direction| self.origin + direction.as_ref() * distance)
    }
}

/// Result of a successful ray intersection with a single surface.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Distance from ray origin along the normalized ray direction.
    pub distance: FloatType,
    pub point: WorldPoint,
    /// Unit normal, facing the side the ray came from.
    pub normal: Unit<WorldVector>,
}

impl Hit {
    /// Builds a hit, orienting the normal against the ray direction.
    /// Returns `None` for hits closer than EPSILON (or behind the ray origin)
    /// and for non-finite values.
    pub fn facing(
        direction: &WorldVector,
        distance: FloatType,
        point: WorldPoint,
        normal: Unit<WorldVector>,
    ) -> Option<Hit> {
        if !distance.is_finite() || distance <= EPSILON {
            return None;
        }
        if !point.coords.iter().all(|c| c.is_finite()) {
            return None;
        }

        let normal = if normal.dot(direction) > 0.0 {
            -normal
        } else {
            normal
        };

        Some(Hit {
            distance,
            point,
            normal,
        })
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use assert2::assert;
    use proptest::prelude::*;

    /// Newtype with `Deref` and an `Arbitrary` impl built from the given strategy
    macro_rules! arbitrary_wrapper {
        ( $wrapper_name:ident ( $type:ty ) -> $block:block ) => {
            #[derive(Copy, Clone, Debug)]
            pub struct $wrapper_name(pub $type);

            impl std::ops::Deref for $wrapper_name {
                type Target = $type;
                fn deref(&self) -> &$type {
                    &self.0
                }
            }

            impl Arbitrary for $wrapper_name {
                type Parameters = ();
                type Strategy = proptest::strategy::BoxedStrategy<Self>;
                fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                    $block.prop_map(|x| $wrapper_name(x)).boxed()
                }
            }
        };
    }

    fn simple_float() -> BoxedStrategy<f32> {
        (-100_000i32..100_000i32).prop_map(|n| n as f32 * 1e-3).boxed()
    }

    arbitrary_wrapper! {
        NonzeroWorldVectorWrapper(WorldVector) -> {
            (simple_float(), simple_float(), simple_float())
                .prop_filter_map(
                    "vector is zero",
                    |coords| {
                        let vector = WorldVector::new(coords.0, coords.1, coords.2);
                        if vector.norm() < 1e-2 {
                            None
                        } else {
                            Some(vector)
                        }
                    })
        }
    }

    arbitrary_wrapper! {
        WorldPointWrapper(WorldPoint) -> {
            (simple_float(), simple_float(), simple_float())
                .prop_map(|coords| {
                    WorldPoint::new(coords.0, coords.1, coords.2)
                })
        }
    }

    #[test]
    fn point_at_uses_normalized_direction() {
        let ray = Ray::new(WorldPoint::new(1.0, 0.0, 0.0), WorldVector::new(0.0, 10.0, 0.0));
        let point = ray.point_at(2.0).unwrap();
        assert!((point - WorldPoint::new(1.0, 2.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn zero_direction_has_no_unit_direction() {
        let ray = Ray::new(WorldPoint::origin(), WorldVector::zeros());
        assert!(ray.unit_direction().is_none());
        assert!(ray.point_at(1.0).is_none());
    }

    #[test]
    fn facing_flips_normal_against_ray() {
        let direction = WorldVector::new(0.0, 0.0, -1.0);
        let away = Unit::new_normalize(WorldVector::new(0.0, 0.0, -1.0));
        let hit = Hit::facing(&direction, 1.0, WorldPoint::origin(), away).unwrap();
        assert!(hit.normal.z == 1.0);
    }

    #[test]
    fn facing_rejects_hits_behind_origin() {
        let direction = WorldVector::new(0.0, 0.0, -1.0);
        let normal = Unit::new_normalize(WorldVector::new(0.0, 0.0, 1.0));
        assert!(Hit::facing(&direction, -1.0, WorldPoint::origin(), normal).is_none());
        assert!(Hit::facing(&direction, 0.0, WorldPoint::origin(), normal).is_none());
        assert!(Hit::facing(&direction, FloatType::NAN, WorldPoint::origin(), normal).is_none());
    }
}
