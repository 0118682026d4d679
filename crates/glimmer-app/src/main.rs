mod cli;

use std::process::ExitCode;
use std::time::Instant;

use glimmer_bloom::backend::SurfaceHandle;
use glimmer_bloom::{
    BloomError, BloomPipeline, CpuBackend, CpuSurface, GpuContext, RenderBackend, WgpuBackend,
};
use glimmer_common::{ConfigError, GlimmerError};
use glimmer_config::{BackendKind, BloomConfig, GlimmerConfig};
use image::RgbaImage;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

const DEFAULT_LOG_DIRECTIVE: &str = "glimmer=info";

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging; the filter is reloadable so the config file can
    // still pick the level.
    let directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let (filter, filter_handle) = reload::Layer::new(log_filter(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    tracing::info!("Glimmer v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            GlimmerConfig::default()
        }
    };

    if args.log_level.is_none() {
        let directive = config_log_directive(&config);
        if let Err(e) = filter_handle.reload(log_filter(&directive)) {
            tracing::warn!("Failed to apply log level from config: {e}");
        }
    }

    apply_overrides(&mut config, &args);
    if let Err(e) = glimmer_config::validation::validate(&config) {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    if args.print_config {
        println!("{}", glimmer_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` plus one directive; an unparsable directive falls back to the default.
fn log_filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
    )
}

fn config_log_directive(config: &GlimmerConfig) -> String {
    format!("glimmer={}", config.logging.level.to_ascii_lowercase())
}

fn load_config(args: &cli::Args) -> Result<GlimmerConfig, ConfigError> {
    match &args.config {
        Some(path) => glimmer_config::load_from_path(path),
        None => glimmer_config::load_default(),
    }
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut GlimmerConfig, args: &cli::Args) {
    if let Some(preset) = args.preset {
        config.bloom.preset = preset;
    }
    if let Some(scale_factor) = args.scale_factor {
        config.bloom.scale_factor = scale_factor;
    }
    if let Some(backend) = args.backend {
        config.render.backend = backend;
    }
}

fn run(args: &cli::Args, config: &GlimmerConfig) -> Result<(), GlimmerError> {
    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        return Err(GlimmerError::Other("input and output paths are required".into()));
    };

    let image = image::open(input)
        .map_err(|e| GlimmerError::Image(format!("{}: {e}", input.display())))?
        .to_rgba8();
    tracing::info!(
        "Loaded {} ({}x{}), preset {}, backend {:?}",
        input.display(),
        image.width(),
        image.height(),
        config.bloom.preset,
        config.render.backend
    );

    let started = Instant::now();
    let result = match config.render.backend {
        BackendKind::Gpu => run_gpu(&image, config)?,
        BackendKind::Cpu => run_cpu(&image, config)?,
    };
    tracing::info!("Bloom applied in {:.1?}", started.elapsed());

    result
        .save(output)
        .map_err(|e| GlimmerError::Image(format!("{}: {e}", output.display())))?;
    tracing::info!("Wrote {}", output.display());
    Ok(())
}

fn run_cpu(image: &RgbaImage, config: &GlimmerConfig) -> Result<RgbaImage, BloomError> {
    let format = config.render.back_buffer_format;
    let mut backend = CpuBackend::new().with_back_buffer_format(format);
    let source = CpuSurface::from_image(image, format);
    let mut destination = CpuSurface::new(image.width(), image.height(), format);

    render(&mut backend, &config.bloom, &source, &mut destination)?;
    Ok(destination.to_image())
}

fn run_gpu(image: &RgbaImage, config: &GlimmerConfig) -> Result<RgbaImage, BloomError> {
    let context = pollster::block_on(GpuContext::headless())?;
    let mut backend = WgpuBackend::new(context, config.render.back_buffer_format)?;
    let source = backend.upload_image(image)?;
    let mut destination =
        backend.create_surface(image.width(), image.height(), backend.back_buffer_format())?;

    render(&mut backend, &config.bloom, &source, &mut destination)?;
    backend.read_surface(&destination)
}

/// Attach, size, run one frame and detach.
fn render<B: RenderBackend>(
    backend: &mut B,
    config: &BloomConfig,
    source: &B::Surface,
    destination: &mut B::Surface,
) -> Result<(), BloomError> {
    let mut pipeline = BloomPipeline::from_config(config)?;
    pipeline.on_attached(backend)?;

    let size = destination.size();
    pipeline.on_resolution_changed(backend, size.width, size.height)?;
    let result = pipeline.process(backend, source, destination);
    pipeline.on_detached(backend);
    result
}
