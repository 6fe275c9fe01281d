use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "quadray")]
#[command(about = "Path tracer with 4-wide SIMD ray packets")]
pub struct Args {
    /// Scene file (JSON); the built-in demo scene is used if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output image (.png, .jpg, ... or .ppm)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 100)]
    pub samples: u32,

    /// Maximum bounces per path
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Seed for the random generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Trace every sample on its own instead of in packets of four
    #[arg(long)]
    pub scalar: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
