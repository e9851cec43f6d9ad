use bon::bon;
use nalgebra::Unit;

use crate::error::SceneError;
use crate::geometry::{EPSILON, FloatType, Ray, ScreenPoint, ScreenSize, WorldPoint, WorldVector};

/// Pinhole camera with an image plane one unit in front of the eye.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    eye: WorldPoint,

    resolution: ScreenSize,

    /// View basis: u points right, v up and w backwards (away from the look-at point).
    u: Unit<WorldVector>,
    v: Unit<WorldVector>,
    w: Unit<WorldVector>,

    half_width: FloatType,
    half_height: FloatType,

    /// Distance between pixel centers on the image plane
    pixel_width: FloatType,
    pixel_height: FloatType,
}

#[bon]
impl Camera {
    /// Builds the camera, `fovy` is the vertical field of view in degrees.
    #[builder]
    pub fn new(
        eye: WorldPoint,
        look_at: WorldPoint,
        up: WorldVector,
        fovy: FloatType,
        aspect: FloatType,
        resolution: ScreenSize,
    ) -> Result<Self, SceneError> {
        if !(fovy > 0.0 && fovy < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vertical field of view {fovy} is outside of (0, 180) degrees"
            )));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(SceneError::InvalidCamera(format!(
                "aspect ratio {aspect} must be positive"
            )));
        }
        if resolution.x < 2 || resolution.y < 2 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution {}x{} must be at least 2x2",
                resolution.x, resolution.y
            )));
        }

        let w = Unit::try_new(eye - look_at, EPSILON).ok_or(SceneError::DegenerateCameraBasis)?;
        let up = Unit::try_new(up, EPSILON).ok_or(SceneError::DegenerateCameraBasis)?;
        let u = Unit::try_new(up.cross(&w), EPSILON).ok_or(SceneError::DegenerateCameraBasis)?;
        let v = Unit::new_normalize(w.cross(&u));

        let half_height = (fovy.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        Ok(Camera {
            eye,
            resolution,
            u,
            v,
            w,
            half_width,
            half_height,
            pixel_width: 2.0 * half_width / (resolution.x - 1) as FloatType,
            pixel_height: 2.0 * half_height / (resolution.y - 1) as FloatType,
        })
    }
}

impl Camera {
    pub fn get_resolution(&self) -> ScreenSize {
        self.resolution
    }

    pub fn eye(&self) -> WorldPoint {
        self.eye
    }

    /// Returns the (u, v, w) view basis.
    pub fn basis(&self) -> [Unit<WorldVector>; 3] {
        [self.u, self.v, self.w]
    }

    /// Creates the eye ray for the given image pixel. Row 0 is the top of the image.
    /// The direction is not normalized.
    pub fn cast_ray(&self, point: &ScreenPoint) -> Ray {
        let u = point.x as FloatType * self.pixel_width - self.half_width;
        let v = self.half_height - point.y as FloatType * self.pixel_height;

        let direction = self.u.as_ref() * u + self.v.as_ref() * v - self.w.as_ref();

        Ray::new(self.eye, direction)
    }
}
