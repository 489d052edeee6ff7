use std::path::PathBuf;

use clap::Parser;
use flowreel::{CrossfadeSpec, Ease, FlowConfig, Normalization, Transitions};

#[derive(Parser, Debug)]
#[command(name = "flowreel", version, about = "Build a looping user-flow GIF from screenshots")]
struct Cli {
    /// Directory holding the screenshots.
    source_dir: Option<PathBuf>,

    /// JSON config file; flags given on the command line override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output GIF path (default: <source_dir>/user-flow.gif).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Explicit ordered file names inside the source directory (comma separated).
    #[arg(long, value_delimiter = ',')]
    files: Option<Vec<String>>,

    /// How long each screenshot is held, in milliseconds.
    #[arg(long)]
    hold_ms: Option<u32>,

    /// Size normalization: `shrink_to_min` or `pad_to_max_blur`.
    #[arg(long)]
    normalize: Option<Normalization>,

    /// Cut straight from one screenshot to the next.
    #[arg(
        long,
        default_value_t = false,
        conflicts_with_all = ["transition_frames", "transition_ms", "ease"]
    )]
    no_transitions: bool,

    /// Intermediate frames per crossfade.
    #[arg(long)]
    transition_frames: Option<u32>,

    /// Display time of each crossfade frame, in milliseconds.
    #[arg(long)]
    transition_ms: Option<u32>,

    /// Crossfade easing curve.
    #[arg(long)]
    ease: Option<Ease>,

    /// Synthesize transitions for different screen pairs in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Log debug details.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let cfg = resolve_config(cli)?;
    let (out_path, stats) = flowreel::render_flow(&cfg)?;

    eprintln!(
        "wrote {} ({} screens, {} frames, {}x{}, {:.1}s loop)",
        out_path.display(),
        stats.inputs,
        stats.frames,
        stats.canvas.width,
        stats.canvas.height,
        stats.total_duration_ms as f64 / 1000.0
    );
    Ok(())
}

fn resolve_config(cli: Cli) -> anyhow::Result<FlowConfig> {
    let mut cfg = match (&cli.config, &cli.source_dir) {
        (Some(path), _) => FlowConfig::from_path(path)?,
        (None, Some(dir)) => FlowConfig::new(dir),
        (None, None) => FlowConfig::default(),
    };

    if let (Some(_), Some(dir)) = (&cli.config, cli.source_dir) {
        cfg.source_dir = dir;
    }
    if cli.out.is_some() {
        cfg.out_path = cli.out;
    }
    if cli.files.is_some() {
        cfg.files = cli.files;
    }
    if let Some(hold_ms) = cli.hold_ms {
        cfg.hold_ms = hold_ms;
    }
    if let Some(normalization) = cli.normalize {
        cfg.normalization = normalization;
    }
    if cli.no_overwrite {
        cfg.overwrite = false;
    }
    if cli.parallel {
        cfg.threading.parallel = true;
    }
    if cli.threads.is_some() {
        cfg.threading.threads = cli.threads;
    }

    if cli.no_transitions {
        cfg.transitions = Transitions::Disabled;
    } else if cli.transition_frames.is_some() || cli.transition_ms.is_some() || cli.ease.is_some()
    {
        let mut spec = match cfg.transitions {
            Transitions::Crossfade(spec) => spec,
            Transitions::Disabled => CrossfadeSpec::default(),
        };
        if let Some(frames) = cli.transition_frames {
            spec.frames = frames;
        }
        if let Some(ms) = cli.transition_ms {
            spec.frame_duration_ms = ms;
        }
        if let Some(ease) = cli.ease {
            spec.ease = ease;
        }
        cfg.transitions = Transitions::Crossfade(spec);
    }

    cfg.validate()?;
    Ok(cfg)
}
