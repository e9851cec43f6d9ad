use nalgebra::Unit;

use crate::{
    geometry::{EPSILON, FloatType, WorldPoint, WorldVector},
    scene::{light::Light, material::Material},
    util::{BLACK, Rgb, modulate},
};

/// Scales down the specular highlight before it is raised to the shininess power.
pub const SPECULAR_DAMPING: FloatType = 0.6;

/// Local Phong-style illumination of a surface point.
///
/// The ambient coefficient is multiplied by the color of every ambient light (so several
/// ambient lights compound and no ambient light leaves `ka` as is); diffuse and specular
/// terms of point and directional lights are summed over all lights.
/// `normal` must face the viewer. The result is not clamped.
pub fn shade(
    material: &Material,
    point: &WorldPoint,
    normal: &Unit<WorldVector>,
    eye: &WorldPoint,
    lights: &[Light],
) -> Rgb {
    let mut ambient = material.ka;
    let mut diffuse = BLACK;
    let mut specular = BLACK;

    let to_eye = (eye - point).try_normalize(EPSILON);

    for light in lights {
        let to_light = match light {
            Light::Ambient { color } => {
                ambient = modulate(ambient, *color);
                continue;
            }
            Light::Point { position, .. } => match (position - point).try_normalize(EPSILON) {
                Some(to_light) => to_light,
                None => continue,
            },
            Light::Directional { direction, .. } => -direction.into_inner(),
        };
        let color = light.color();

        let cos = normal.dot(&to_light).max(0.0);
        diffuse += modulate(material.kd, color) * cos;

        let highlight = to_eye
            .and_then(|to_eye| (to_eye + to_light).try_normalize(EPSILON))
            .map_or(0.0, |half| normal.dot(&half));
        let intensity = if highlight > 0.0 {
            highlight * SPECULAR_DAMPING
        } else {
            0.0
        };
        let shininess = material.shininess;
        specular += modulate(
            material.ks,
            Rgb::new(
                (color.r * intensity).powf(shininess),
                (color.g * intensity).powf(shininess),
                (color.b * intensity).powf(shininess),
            ),
        );
    }

    ambient + diffuse + specular
}
