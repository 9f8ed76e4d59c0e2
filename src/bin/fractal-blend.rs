use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use fractal_blend::{
    Background, CapturePolicy, CodecSupport as _, Container, CpuCurveRenderer, DirectorySink,
    ExportFormat, ExportOptions, FfmpegBackend, Fps, RenderSurface as _, Resolution, SceneParams,
    Studio,
};

#[derive(Parser, Debug)]
#[command(name = "fractal-blend", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Simulate display ticks, record and export.
    Record(RecordArgs),
    /// Show which codec each video format negotiates on this machine.
    Codecs,
    /// Write the default scene parameters as JSON.
    Params(ParamsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene parameter JSON (defaults when omitted).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Animation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Background opacity in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    opacity: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Scene parameter JSON (defaults when omitted).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Recording length in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Export frame rate.
    #[arg(long, default_value_t = 24)]
    frame_rate: u32,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    #[arg(long, value_enum, default_value_t = ExportFormat::PngSequence)]
    format: ExportFormat,

    /// Video bitrate in Mbps.
    #[arg(long, default_value_t = 8)]
    bitrate: u32,

    /// Directory receiving the exported files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Simulated display refresh rate in Hz.
    #[arg(long, default_value_t = 60)]
    refresh_rate: u32,

    /// Capture every display tick instead of every other one.
    #[arg(long, default_value_t = false)]
    every_tick: bool,

    /// Pause between sequence batches, in milliseconds.
    #[arg(long, default_value_t = 200)]
    batch_delay_ms: u64,

    /// Bundle a png-sequence export into one zip archive.
    #[arg(long, default_value_t = false)]
    archive: bool,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Record(args) => cmd_record(args),
        Command::Codecs => cmd_codecs(),
        Command::Params(args) => cmd_params(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: Option<&PathBuf>) -> anyhow::Result<SceneParams> {
    Ok(match path {
        Some(p) => SceneParams::from_path(p)?,
        None => SceneParams::default(),
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_ref())?;
    let res = Resolution::new(args.width, args.height)?;
    let mut renderer = CpuCurveRenderer::new();
    let frame = renderer.render_frame(
        &params,
        args.time,
        res,
        Background {
            color: params.render.background,
            opacity: args.opacity.clamp(0.0, 1.0),
        },
    )?;
    let png = fractal_blend::encode::png::encode_png(&frame)?;

    fractal_blend::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_ref())?;
    let options = ExportOptions {
        format: args.format,
        frame_rate: args.frame_rate,
        bitrate_mbps: args.bitrate,
        resolution: Resolution::new(args.width, args.height)?,
        recording_duration_secs: args.duration,
        batch_delay_ms: args.batch_delay_ms,
        archive: args.archive,
        ..ExportOptions::default()
    };
    let refresh = Fps::integer(args.refresh_rate)?;

    let mut studio = Studio::new()?;
    studio.set_options(options)?;
    if args.every_tick {
        studio.set_capture_policy(CapturePolicy::EveryTick)?;
    }
    *studio.params_mut() = params;

    studio.start_recording()?;
    let mut tick = 0u64;
    while studio.is_recording() {
        let elapsed = tick as f64 * refresh.frame_duration_secs();
        studio.on_animation_frame(elapsed)?;
        tick += 1;
    }
    eprintln!(
        "captured {} frames over {} display ticks",
        studio.frame_count(),
        tick
    );

    let mut sink = DirectorySink::new(&args.out_dir);
    let report = studio.export_as(&options, &mut sink, &mut |p| {
        tracing::debug!(progress = p, "export progress");
    })?;
    if let Some(codec) = report.codec {
        eprintln!(
            "encoded with {codec}{}",
            if report.fell_back { " (fallback)" } else { "" }
        );
    }
    if !report.frames_dropped.is_empty() {
        eprintln!("dropped {} undecodable frames", report.frames_dropped.len());
    }
    for path in sink.written() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_codecs() -> anyhow::Result<()> {
    let backend = FfmpegBackend::new();
    if !fractal_blend::is_ffmpeg_on_path() {
        println!("ffmpeg: not found on PATH");
    }
    for (format, container) in [
        (ExportFormat::Webm, Container::WebM),
        (ExportFormat::Mp4, Container::Mp4),
    ] {
        let chosen = fractal_blend::encode::codec::negotiate(container, &backend);
        let first = chosen
            .first()
            .copied()
            .unwrap_or_else(|| backend.guaranteed_fallback());
        let fallback = first == backend.guaranteed_fallback();
        println!(
            "{format}: {first} (.{}){}",
            first.extension(),
            if fallback { " [fallback]" } else { "" }
        );
    }
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> anyhow::Result<()> {
    let json = SceneParams::default().to_json_pretty()?;
    fractal_blend::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write params '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
