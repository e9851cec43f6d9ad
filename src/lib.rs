mod camera;
mod error;
pub mod geometry;
mod renderer;
pub mod scene;
mod shading;
mod tracer;
mod util;

pub use crate::renderer::{
    PixelSink, Probe, ProbeHit, RenderStats, Verbosity, color_to_image, probe, render,
};
pub use camera::Camera;
pub use error::SceneError;
pub use scene::Scene;
pub use shading::{SPECULAR_DAMPING, shade};
pub use tracer::{
    BACKGROUND, SurfaceHit, closest, color_of, intersections, nearest_hit, shade_hit, trace,
};
pub use util::Rgb;
