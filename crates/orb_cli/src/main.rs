mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use log::LevelFilter;
use orb_renderer::{RenderConfig, Renderer, DEFAULT_SEED, DEMO_EXPOSURE};
use std::path::Path;
use std::time::Instant;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Parse a JSON render configuration.
///
/// Fields left out take their defaults, except exposure, which falls back
/// to the demo scene's exposure just as it does without a config file.
fn parse_config(text: &str) -> Result<RenderConfig> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let has_exposure = value.get("exposure").is_some();

    let mut config: RenderConfig = serde_json::from_value(value)?;
    if !has_exposure {
        config.exposure = DEMO_EXPOSURE;
    }
    Ok(config)
}

/// Load the config file if given, then apply command-line overrides.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default().with_exposure(DEMO_EXPOSURE),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(exposure) = args.exposure {
        config.exposure = exposure;
    }

    config.validate().context("invalid render configuration")?;
    Ok(config)
}

fn save_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let image = image::RgbaImage::from_raw(width, height, rgba)
        .context("pixel buffer does not match the image size")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or(DEFAULT_SEED);
    let (width, height) = (config.width, config.height);

    let mut renderer = Renderer::initialize_scene(config, seed)?;

    log::info!("Rendering {} samples at {}x{}", args.samples, width, height);
    let start = Instant::now();

    for _ in 0..args.samples {
        let frame = renderer.render_one_sample();
        if frame.sample_count % 16 == 0 {
            log::info!(
                "{} samples, {:.2} Mrays/s",
                frame.sample_count,
                frame.mrays_per_second()
            );
        }
    }

    let elapsed = start.elapsed();
    let total_rays = renderer.total_rays();
    log::info!(
        "Finished in {:.2?}: {} rays ({:.2} Mrays/s)",
        elapsed,
        total_rays,
        total_rays as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1.0e6
    );

    save_png(&args.output, width, height, renderer.film().to_rgba8())?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
