use nalgebra::Unit;

use crate::{
    geometry::{WorldPoint, WorldVector},
    util::Rgb,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: Rgb,
    },
    Point {
        position: WorldPoint,
        color: Rgb,
    },
    /// Light arriving from infinity, `direction` is the direction the light travels in.
    Directional {
        direction: Unit<WorldVector>,
        color: Rgb,
    },
}

impl Light {
    pub fn color(&self) -> Rgb {
        match self {
            Light::Ambient { color }
            | Light::Point { color, .. }
            | Light::Directional { color, .. } => *color,
        }
    }
}
