//! Serialized form of a scene, as stored in JSON scene files.
//!
//! These types mirror the file format one to one and carry no guarantees,
//! [`Scene::from_description`](super::Scene::from_description) validates them.

use std::{fmt, fs, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{error::SceneError, geometry::FloatType};

pub type Triple = [FloatType; 3];

#[derive(Clone, Debug, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default)]
    pub materials: MaterialTable,
}

impl SceneDescription {
    pub fn from_json(json: &str) -> Result<SceneDescription, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<SceneDescription, SceneError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CameraDescription {
    pub eye: Triple,
    pub at: Triple,
    pub up: Triple,
    /// Vertical field of view in degrees
    pub fovy: FloatType,
    pub aspect: FloatType,
}

/// A sphere if `shape` is `"Sphere"`, a triangle otherwise.
#[derive(Clone, Debug, Deserialize)]
pub struct SurfaceDescription {
    #[serde(default)]
    pub shape: String,
    pub material: MaterialId,
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub center: Option<Triple>,
    #[serde(default)]
    pub radius: Option<FloatType>,

    #[serde(default)]
    pub p1: Option<Triple>,
    #[serde(default)]
    pub p2: Option<Triple>,
    #[serde(default)]
    pub p3: Option<Triple>,
}

impl SurfaceDescription {
    pub fn is_sphere(&self) -> bool {
        self.shape == "Sphere"
    }
}

/// Material reference, either a position in an array material table or a key in an object one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MaterialId {
    Index(usize),
    Name(String),
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialId::Index(index) => write!(f, "{index}"),
            MaterialId::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialTable {
    List(Vec<MaterialDescription>),
    Map(IndexMap<String, MaterialDescription>),
}

impl Default for MaterialTable {
    fn default() -> Self {
        MaterialTable::Map(IndexMap::new())
    }
}

impl MaterialTable {
    /// Iterates over (key, material) pairs, array tables are keyed by the decimal index.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (String, &MaterialDescription)> + '_> {
        match self {
            MaterialTable::List(list) => Box::new(
                list.iter()
                    .enumerate()
                    .map(|(index, material)| (index.to_string(), material)),
            ),
            MaterialTable::Map(map) => Box::new(map.iter().map(|(k, v)| (k.clone(), v))),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MaterialDescription {
    pub ka: Triple,
    pub kd: Triple,
    pub ks: Triple,
    pub shininess: FloatType,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "source")]
pub enum LightDescription {
    Ambient { color: Triple },
    Point { color: Triple, position: Triple },
    Directional { color: Triple, direction: Triple },
}
