use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Progressive path tracer for sphere scenes.
#[derive(Debug, Parser)]
#[command(name = "orb")]
#[command(about = "Render the sphere demo scene to a PNG")]
pub struct Args {
    /// JSON render configuration; flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Accumulation passes (samples per pixel)
    #[arg(short, long, default_value_t = 64)]
    pub samples: u32,

    /// Exposure in stops; defaults to the demo scene's exposure
    #[arg(short, long, allow_negative_numbers = true)]
    pub exposure: Option<f32>,

    /// Seed for the demo scene layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output PNG path
    #[arg(short, long, default_value = "orb.png")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
