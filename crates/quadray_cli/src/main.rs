use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use quadray_renderer::{default_scene, load_scene, render, Canvas, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;

use cli::Args;

fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn save(canvas: &Canvas, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        canvas
            .write_ppm(&mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        canvas
            .save(path)
            .with_context(|| format!("saving {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let description = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the built-in demo scene");
            default_scene()
        }
    };

    let camera = description.camera.camera(args.width, args.height);
    let scene = Scene::new(&description.objects, &description.lights);
    let config = RenderConfig {
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        packet: !args.scalar,
    };

    log::info!(
        "Rendering {}x{}, {} samples, depth {}, {} tracing",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth,
        if config.packet { "packet" } else { "scalar" }
    );

    let mut canvas = Canvas::new(camera.image_width, camera.image_height);
    let mut rng = StdRng::seed_from_u64(args.seed);
    render(&camera, &scene, &mut canvas, &config, &mut rng);

    save(&canvas, &args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
