mod sink;

use std::time::{Duration, Instant};

use log::{Level, info, log};

use crate::{
    geometry::{Hit, Ray, ScreenPoint},
    scene::Scene,
    tracer::{closest, color_of, intersections, nearest_hit},
    util::Rgb,
};

pub use sink::{PixelSink, color_to_image};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderStats {
    pub pixels: u64,
    /// Pixels whose eye ray hit a surface
    pub hits: u64,
    pub elapsed: Duration,
}

/// Renders every pixel of the camera's resolution into the sink, row by row from the top.
///
/// `row_finished` is called with the number of finished rows and the total row count
/// after each row.
pub fn render<S, F>(scene: &Scene, sink: &mut S, mut row_finished: F) -> RenderStats
where
    S: PixelSink + ?Sized,
    F: FnMut(u32, u32),
{
    let start = Instant::now();
    let camera = scene.camera();
    let resolution = camera.get_resolution();

    let mut hits = 0;
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            let point = ScreenPoint::new(x, y);
            let ray = camera.cast_ray(&point);
            let nearest = nearest_hit(scene, &ray);
            if nearest.is_some() {
                hits += 1;
            }
            sink.set(point, color_of(scene, nearest.as_ref()));
        }
        row_finished(y + 1, resolution.y);
    }

    let stats = RenderStats {
        pixels: resolution.x as u64 * resolution.y as u64,
        hits,
        elapsed: start.elapsed(),
    };
    info!(
        "Rendered {}x{} pixels ({} hits) in {:?}",
        resolution.x, resolution.y, stats.hits, stats.elapsed
    );
    stats
}

/// How much a probe reports through the log.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Per-surface results at debug level
    #[default]
    Quiet,
    /// Per-surface results at info level
    Verbose,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::Debug,
            Verbosity::Verbose => Level::Info,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProbeHit {
    pub surface_index: usize,
    pub surface_label: String,
    pub hit: Hit,
}

/// Result of casting a single diagnostic ray.
#[derive(Clone, Debug)]
pub struct Probe {
    pub point: ScreenPoint,
    pub ray: Ray,
    pub hit: Option<ProbeHit>,
    pub color: Rgb,
}

/// Casts the eye ray of one pixel and reports what it hits.
pub fn probe(scene: &Scene, point: ScreenPoint, verbosity: Verbosity) -> Probe {
    let level = verbosity.level();
    let ray = scene.camera().cast_ray(&point);
    log!(
        level,
        "Probe ray for pixel ({}, {}): origin {:?}, direction {:?}",
        point.x,
        point.y,
        ray.origin,
        ray.direction
    );

    let nearest = closest(intersections(scene, &ray).inspect(|(index, surface, hit)| {
        match hit {
            Some(hit) => log!(
                level,
                "  {}: hit at distance {} point {:?}",
                surface.label(*index),
                hit.distance,
                hit.point
            ),
            None => log!(level, "  {}: miss", surface.label(*index)),
        }
    }));
    let color = color_of(scene, nearest.as_ref());
    let hit = nearest.map(|surface_hit| ProbeHit {
        surface_index: surface_hit.index,
        surface_label: surface_hit.surface.label(surface_hit.index),
        hit: surface_hit.hit,
    });

    match &hit {
        Some(probe_hit) => log!(
            level,
            "Nearest: {} at distance {}, color {:?}",
            probe_hit.surface_label,
            probe_hit.hit.distance,
            color
        ),
        None => log!(level, "Nearest: nothing"),
    }

    Probe {
        point,
        ray,
        hit,
        color,
    }
}
