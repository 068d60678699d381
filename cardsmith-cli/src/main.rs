use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cardsmith::{AppConfig, CardCustomizer, ExportOutcome, UiEvent};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const FRAME_S: f64 = 1.0 / 60.0;
/// Reveal plus rotation hint, after the loader.
const INTRO_S: f64 = 5.0;

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version)]
struct Cli {
    /// Session config JSON; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an event script, then export the card as "Download card" does.
    Export(ExportArgs),
    /// Render the current pose to a PNG without moving the camera.
    Preview(PreviewArgs),
    /// Write the synthesized card textures as PNGs.
    Textures(TexturesArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// JSON array of UI events to replay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Canvas width override.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override.
    #[arg(long)]
    height: Option<u32>,

    /// Seconds to let the loader and intro run before acting; defaults to the loader
    /// minimum plus the intro.
    #[arg(long)]
    settle: Option<f64>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Downloads directory override.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Date stamped into the file name (YYYY-MM-DD); today when omitted.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TexturesArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    match cli.cmd {
        Command::Export(args) => cmd_export(config, args),
        Command::Preview(args) => cmd_preview(config, args),
        Command::Textures(args) => cmd_textures(config, args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn start_session(mut config: AppConfig, args: &SessionArgs) -> anyhow::Result<CardCustomizer> {
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    let mut session = CardCustomizer::from_config(&config);

    let settle = args.settle.unwrap_or(config.min_loading_s + INTRO_S);
    session.settle(settle, FRAME_S);

    if let Some(path) = &args.script {
        let events = read_events(path)?;
        tracing::info!(events = events.len(), script = %path.display(), "replaying script");
        for event in events {
            if let Some(outcome) = session.dispatch(event) {
                report(&outcome);
            }
        }
    }
    Ok(session)
}

fn read_events(path: &Path) -> anyhow::Result<Vec<UiEvent>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let events = cardsmith::read_script(std::io::BufReader::new(file))
        .with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(events)
}

fn report(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Saved {
            filename,
            tier,
            bytes,
        } => tracing::info!(%filename, ?tier, bytes, "export saved"),
        ExportOutcome::Failed { reason } => tracing::error!(%reason, "export failed"),
    }
}

fn cmd_export(mut config: AppConfig, args: ExportArgs) -> anyhow::Result<()> {
    if let Some(dir) = args.out_dir {
        config.downloads_dir = dir;
    }
    let downloads = config.downloads_dir.clone();
    let mut session = start_session(config, &args.session)?;
    if let Some(date) = args.date {
        session = session.with_date(date);
    }

    match session.run_export(FRAME_S) {
        Some(ExportOutcome::Saved { filename, .. }) => {
            eprintln!("wrote {}", downloads.join(filename).display());
            Ok(())
        }
        Some(ExportOutcome::Failed { reason }) => anyhow::bail!("export failed: {reason}"),
        None => anyhow::bail!("export could not start: the card model is not loaded"),
    }
}

fn cmd_preview(config: AppConfig, args: PreviewArgs) -> anyhow::Result<()> {
    let mut session = start_session(config, &args.session)?;
    let frame = session.render_preview().context("render preview")?;
    let png = cardsmith::encode_png(frame.width, frame.height, &frame.data)?;
    write_file(&args.out, &png)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_textures(config: AppConfig, args: TexturesArgs) -> anyhow::Result<()> {
    let session = start_session(config, &args.session)?;
    let textures = session.card_textures();
    if textures.is_empty() {
        anyhow::bail!("no card textures: the card model is not loaded");
    }
    for (mesh, image) in textures {
        let png = cardsmith::encode_png(image.width, image.height, &image.rgba8_premul)?;
        let path = args.out_dir.join(format!("{}.png", mesh.as_str()));
        write_file(&path, &png)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}
