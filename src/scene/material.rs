use crate::{geometry::FloatType, util::Rgb};

index_vec::define_index_type! {
    /// Index of a material in the scene's material table.
    pub struct MaterialIdx = u32;
}

/// Phong-style material coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub ka: Rgb,
    pub kd: Rgb,
    pub ks: Rgb,
    pub shininess: FloatType,
}
