use thiserror::Error;

use crate::geometry::FloatType;

/// Errors detected while building a scene. A scene that fails to load is never partially used.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Camera up vector is parallel to the viewing direction (or eye equals look-at)")]
    DegenerateCameraBasis,

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Surface {surface} references unknown material {material:?}")]
    UnresolvedMaterial { surface: String, material: String },

    #[error("Surface {surface} is invalid: {reason}")]
    InvalidSurface { surface: String, reason: String },

    #[error("Light #{light} is invalid: {reason}")]
    InvalidLight { light: usize, reason: String },

    #[error("Material {material:?} has invalid shininess {shininess}")]
    InvalidMaterial {
        material: String,
        shininess: FloatType,
    },
}
