use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::RgbaImage;
use indicatif::ProgressBar;
use itertools::Itertools;
use log::LevelFilter;
use minicast::{
    Scene, Verbosity,
    geometry::{ScreenPoint, ScreenSize},
    probe, render,
};

/// Renders a JSON scene description with a single eye ray per pixel.
#[derive(Parser)]
#[command(name = "minicast")]
struct Args {
    /// Scene description file
    scene: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Output PNG file
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Cast a single debug ray through pixel X,Y instead of rendering
    #[arg(long, value_name = "X,Y", value_parser = parse_pixel)]
    probe: Option<ScreenPoint>,

    /// Report every surface test of a probe
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn parse_pixel(s: &str) -> Result<ScreenPoint, String> {
    let (x, y) = s
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect_tuple()
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.map_err(|e| format!("invalid x coordinate: {e}"))?;
    let y = y.map_err(|e| format!("invalid y coordinate: {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level)
        .init();

    let resolution = ScreenSize::new(args.width, args.height);
    let scene = Scene::load(&args.scene, resolution)
        .with_context(|| format!("Loading scene {}", args.scene.display()))?;

    if let Some(point) = args.probe {
        anyhow::ensure!(
            point.x < resolution.x && point.y < resolution.y,
            "Probe pixel {},{} is outside of the {}x{} image",
            point.x,
            point.y,
            resolution.x,
            resolution.y
        );

        let verbosity = if args.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        };
        let probe = probe(&scene, point, verbosity);

        println!(
            "Pixel {},{}: ray from {:?} towards {:?}",
            point.x, point.y, probe.ray.origin, probe.ray.direction
        );
        match &probe.hit {
            Some(probe_hit) => println!(
                "Hit {} at distance {}, point {:?}, normal {:?}",
                probe_hit.surface_label,
                probe_hit.hit.distance,
                probe_hit.hit.point,
                probe_hit.hit.normal.into_inner()
            ),
            None => println!("No hit"),
        }
        println!("Color: {} {} {}", probe.color.r, probe.color.g, probe.color.b);
        return Ok(());
    }

    let mut image = RgbaImage::new(resolution.x, resolution.y);
    let bar = ProgressBar::new(resolution.y as u64);
    let stats = render(&scene, &mut image, |finished, _| bar.set_position(finished as u64));
    bar.finish();

    image
        .save(&args.output)
        .with_context(|| format!("Saving image to {}", args.output.display()))?;

    println!(
        "Rendered {} pixels ({} hit a surface) in {:?}, saved to {}",
        stats.pixels,
        stats.hits,
        stats.elapsed,
        args.output.display()
    );

    Ok(())
}
