use std::path::PathBuf;

use clap::Parser;
use glimmer_config::{BackendKind, BloomPreset};

/// Apply a bloom post-process to an image.
#[derive(Parser, Debug)]
#[command(name = "glimmer", version, about)]
pub struct Args {
    /// Image to read.
    #[arg(required_unless_present = "print_config")]
    pub input: Option<PathBuf>,

    /// PNG file to write.
    #[arg(required_unless_present = "print_config")]
    pub output: Option<PathBuf>,

    /// Bloom preset (default, soft, desaturated, saturated, blurry, subtle).
    #[arg(short, long)]
    pub preset: Option<BloomPreset>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Intermediate surface scale factor (1-8).
    #[arg(long)]
    pub scale_factor: Option<u32>,

    /// Rendering backend (gpu, cpu).
    #[arg(long)]
    pub backend: Option<BackendKind>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
