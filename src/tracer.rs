use ordered_float::OrderedFloat;

use crate::{
    geometry::{Hit, Ray},
    scene::{Object, Scene, primitives::Surface},
    shading::shade,
    util::{BLACK, Rgb},
};

/// Color of pixels whose ray hits nothing.
pub const BACKGROUND: Rgb = BLACK;

/// The surface a ray hit first, together with its position in the scene.
#[derive(Clone, Debug)]
pub struct SurfaceHit<'a> {
    pub index: usize,
    pub surface: &'a Surface,
    pub hit: Hit,
}

/// Tests the ray against every surface of the scene, in scene order.
pub fn intersections<'a>(
    scene: &'a Scene,
    ray: &Ray,
) -> impl Iterator<Item = (usize, &'a Surface, Option<Hit>)> {
    scene
        .surfaces()
        .iter()
        .enumerate()
        .map(move |(index, surface)| (index, surface, surface.intersect(ray)))
}

/// Picks the closest of the intersection results. If two surfaces are hit at the same
/// distance, the one listed first wins.
pub fn closest<'a>(
    intersections: impl Iterator<Item = (usize, &'a Surface, Option<Hit>)>,
) -> Option<SurfaceHit<'a>> {
    intersections
        .filter_map(|(index, surface, hit)| {
            hit.map(|hit| SurfaceHit {
                index,
                surface,
                hit,
            })
        })
        .min_by_key(|surface_hit| OrderedFloat(surface_hit.hit.distance))
}

pub fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<SurfaceHit<'a>> {
    closest(intersections(scene, ray))
}

pub fn shade_hit(scene: &Scene, surface_hit: &SurfaceHit) -> Rgb {
    shade(
        scene.material(surface_hit.surface.material),
        &surface_hit.hit.point,
        &surface_hit.hit.normal,
        &scene.camera().eye(),
        scene.lights(),
    )
}

/// Shaded color of the nearest hit, background if there is none.
pub fn color_of(scene: &Scene, nearest: Option<&SurfaceHit>) -> Rgb {
    nearest.map_or(BACKGROUND, |surface_hit| shade_hit(scene, surface_hit))
}

/// Color seen along a single ray.
pub fn trace(scene: &Scene, ray: &Ray) -> Rgb {
    color_of(scene, nearest_hit(scene, ray).as_ref())
}
