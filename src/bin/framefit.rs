use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framefit::{
    EngineConfig, LoadEvent, LoadState, Point, Session, TransformState, decode_image,
    declared_type_for_path,
};

#[derive(Parser, Debug)]
#[command(name = "framefit", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a photo behind a frame and write the PNG export.
    Compose(ComposeArgs),
    /// Print the auto-fit transform for a photo as JSON.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Photo to place behind the frame (.png or .jpg).
    #[arg(long)]
    photo: PathBuf,

    /// Frame overlay image.
    #[arg(long)]
    frame: PathBuf,

    /// Output PNG path (defaults to the configured export file name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Export side length in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=65535))]
    size: Option<u32>,

    /// Absolute zoom, as the zoom slider would set it.
    #[arg(long)]
    zoom: Option<f64>,

    /// Horizontal pan in reference pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_x: f64,

    /// Vertical pan in reference pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_y: f64,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Photo to fit.
    #[arg(long)]
    photo: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct FitReport {
    width: u32,
    height: u32,
    reference_size: u32,
    cover_scale: f64,
    transform: TransformState,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => Ok(EngineConfig::from_path(p)?),
        None => Ok(EngineConfig::default()),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(size) = args.size {
        config.export_size = size;
    }

    let mut sess = Session::with_frame_path(config, &args.frame)?;

    let bytes = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    let declared = declared_type_for_path(&args.photo);
    sess.submit_upload(declared, bytes, Instant::now())
        .with_context(|| format!("upload '{}'", args.photo.display()))?;

    match sess.wait(Instant::now())? {
        Some(LoadEvent::Installed(_)) => {}
        Some(LoadEvent::Failed(msg)) => {
            anyhow::bail!("decode photo '{}': {msg}", args.photo.display())
        }
        None => anyhow::bail!("photo upload did not settle"),
    }
    if let LoadState::Failed(msg) = sess.frame_state() {
        anyhow::bail!("load frame '{}': {msg}", args.frame.display());
    }

    if let Some(zoom) = args.zoom {
        sess.set_zoom(zoom)?;
    }
    if args.pan_x != 0.0 || args.pan_y != 0.0 {
        sess.drag_start(Point::ZERO);
        sess.drag_move(Point::new(args.pan_x, args.pan_y))?;
        sess.drag_end();
    }

    let export = sess
        .export()?
        .context("nothing to export: photo or frame not loaded")?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&export.file_name));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &export.png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let bytes = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    let image = decode_image(&bytes)?;
    let size = image.size();
    let reference = config.reference();

    let report = FitReport {
        width: size.width,
        height: size.height,
        reference_size: config.reference_size,
        cover_scale: TransformState::cover_scale(size, reference),
        transform: TransformState::fit(size, reference),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
