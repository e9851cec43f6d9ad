pub mod description;
pub mod light;
pub mod material;
pub mod primitives;

use std::{collections::HashMap, path::Path};

use index_vec::{Idx as _, IndexVec};
use log::info;
use nalgebra::Unit;

use crate::{
    camera::Camera,
    error::SceneError,
    geometry::{EPSILON, Hit, Ray, ScreenSize, Triangle, WorldPoint, WorldVector},
    util::rgb_from_array,
};

use description::{LightDescription, SceneDescription, SurfaceDescription, Triple};
use light::Light;
use material::{Material, MaterialIdx};
use primitives::{Shape, Sphere, Surface};

/// Renderable object
pub trait Object {
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

/// Everything needed to render an image. Immutable once built.
#[derive(Clone, Debug)]
pub struct Scene {
    camera: Camera,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
    materials: IndexVec<MaterialIdx, Material>,
}

impl Scene {
    /// Assembles a scene, checking that every surface is valid and refers to an existing material.
    pub fn new(
        camera: Camera,
        surfaces: Vec<Surface>,
        lights: Vec<Light>,
        materials: IndexVec<MaterialIdx, Material>,
    ) -> Result<Scene, SceneError> {
        Self::with_material_names(camera, surfaces, lights, materials, |idx| {
            idx.index().to_string()
        })
    }

    /// Like [`Scene::new`], `material_name` names materials in error messages.
    fn with_material_names(
        camera: Camera,
        surfaces: Vec<Surface>,
        lights: Vec<Light>,
        materials: IndexVec<MaterialIdx, Material>,
        material_name: impl Fn(MaterialIdx) -> String,
    ) -> Result<Scene, SceneError> {
        for (idx, material) in materials.iter_enumerated() {
            if !(material.shininess > 0.0 && material.shininess.is_finite()) {
                return Err(SceneError::InvalidMaterial {
                    material: material_name(idx),
                    shininess: material.shininess,
                });
            }
        }

        for (index, surface) in surfaces.iter().enumerate() {
            surface
                .shape
                .validate()
                .map_err(|reason| SceneError::InvalidSurface {
                    surface: surface.label(index),
                    reason,
                })?;
            if surface.material.index() >= materials.len() {
                return Err(SceneError::UnresolvedMaterial {
                    surface: surface.label(index),
                    material: surface.material.index().to_string(),
                });
            }
        }

        Ok(Scene {
            camera,
            surfaces,
            lights,
            materials,
        })
    }

    /// Builds a scene from its serialized description, rendered at the given resolution.
    pub fn from_description(
        description: &SceneDescription,
        resolution: ScreenSize,
    ) -> Result<Scene, SceneError> {
        let camera_description = &description.camera;
        let camera = Camera::builder()
            .eye(point(camera_description.eye))
            .look_at(point(camera_description.at))
            .up(vector(camera_description.up))
            .fovy(camera_description.fovy)
            .aspect(camera_description.aspect)
            .resolution(resolution)
            .build()?;

        let mut materials = IndexVec::new();
        let mut material_names: IndexVec<MaterialIdx, String> = IndexVec::new();
        let mut material_keys = HashMap::new();
        for (key, material) in description.materials.entries() {
            let idx = materials.push(Material {
                ka: rgb_from_array(material.ka),
                kd: rgb_from_array(material.kd),
                ks: rgb_from_array(material.ks),
                shininess: material.shininess,
            });
            material_names.push(key.clone());
            material_keys.insert(key, idx);
        }

        let surfaces = description
            .surfaces
            .iter()
            .enumerate()
            .map(|(index, surface)| -> Result<Surface, SceneError> {
                let name = surface
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("#{index}"));
                let key = surface.material.to_string();
                let material = *material_keys.get(&key).ok_or_else(|| {
                    SceneError::UnresolvedMaterial {
                        surface: name.clone(),
                        material: key,
                    }
                })?;
                let shape = build_shape(surface).map_err(|reason| SceneError::InvalidSurface {
                    surface: name,
                    reason,
                })?;
                Ok(Surface {
                    shape,
                    material,
                    name: surface.name.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let lights = description
            .lights
            .iter()
            .enumerate()
            .map(|(index, light)| build_light(light, index))
            .collect::<Result<Vec<_>, SceneError>>()?;

        Scene::with_material_names(camera, surfaces, lights, materials, |idx| {
            material_names[idx].clone()
        })
    }

    /// Reads, parses and validates a scene file.
    pub fn load(path: impl AsRef<Path>, resolution: ScreenSize) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let description = SceneDescription::from_path(path)?;
        let scene = Scene::from_description(&description, resolution)?;
        info!(
            "Loaded scene {}: {} surfaces, {} lights, {} materials",
            path.display(),
            scene.surfaces.len(),
            scene.lights.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Replaces this scene with one loaded from a file, keeping the resolution.
    /// On error the current scene stays untouched.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        *self = Scene::load(path, self.camera.get_resolution())?;
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn material(&self, idx: MaterialIdx) -> &Material {
        &self.materials[idx]
    }
}

fn point(p: Triple) -> WorldPoint {
    WorldPoint::new(p[0], p[1], p[2])
}

fn vector(v: Triple) -> WorldVector {
    WorldVector::new(v[0], v[1], v[2])
}

fn build_shape(surface: &SurfaceDescription) -> Result<Shape, String> {
    let required = |value: Option<Triple>, field: &str| {
        value.ok_or_else(|| format!("missing field `{field}`"))
    };

    if surface.is_sphere() {
        Ok(Shape::Sphere(Sphere {
            center: point(required(surface.center, "center")?),
            radius: surface
                .radius
                .ok_or_else(|| "missing field `radius`".to_string())?,
        }))
    } else {
        Ok(Shape::Triangle(Triangle::new(
            point(required(surface.p1, "p1")?),
            point(required(surface.p2, "p2")?),
            point(required(surface.p3, "p3")?),
        )))
    }
}

fn build_light(light: &LightDescription, index: usize) -> Result<Light, SceneError> {
    Ok(match light {
        LightDescription::Ambient { color } => Light::Ambient {
            color: rgb_from_array(*color),
        },
        LightDescription::Point { color, position } => Light::Point {
            position: point(*position),
            color: rgb_from_array(*color),
        },
        LightDescription::Directional { color, direction } => Light::Directional {
            direction: Unit::try_new(vector(*direction), EPSILON).ok_or_else(|| {
                SceneError::InvalidLight {
                    light: index,
                    reason: "direction must be non-zero".to_string(),
                }
            })?,
            color: rgb_from_array(*color),
        },
    })
}
