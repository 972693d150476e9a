use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "attractor", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an attractor to a PNG.
    Render(RenderArgs),
    /// Print the realized attractor's bounds, channels and constants.
    Info(SourceArgs),
    /// Print the RPN form of an infix expression.
    Rpn {
        /// Infix expression, e.g. "3/2 + 4*(12+3)".
        expr: String,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Attractor config JSON.
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in preset: `clifford`, `classic`, or `random` for random literal coefficients.
    #[arg(long, default_value = "clifford")]
    preset: String,

    /// Seed for constant sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Iteration steps.
    #[arg(long)]
    points: Option<usize>,

    /// Rounds of literal mutation applied before realizing.
    #[arg(long, default_value_t = 0)]
    mutate: usize,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 1024)]
    height: u32,

    /// Empty border in pixels.
    #[arg(long, default_value_t = 16)]
    margin: u32,

    /// Resample constants until at least this fraction of a 64x64 grid is covered.
    #[arg(long)]
    min_occupancy: Option<f64>,

    /// Resampling attempts allowed by `--min-occupancy`.
    #[arg(long, default_value_t = 20)]
    retries: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
        Command::Rpn { expr } => cmd_rpn(&expr),
    }
}

const RANDOM_PRESET: &str = "random";

fn read_config(path: &Path) -> anyhow::Result<attractor::AttractorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    attractor::AttractorConfig::from_json_str(&text)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn build_attractor(args: &SourceArgs) -> anyhow::Result<attractor::Attractor> {
    let mut cfg = match &args.config {
        Some(path) => read_config(path)?,
        None if args.preset == RANDOM_PRESET => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            attractor::AttractorConfig::random_clifford(&mut rng)
        }
        None => attractor::AttractorConfig::preset(&args.preset).with_context(|| {
            format!(
                "unknown preset '{}' (expected one of: {}, {RANDOM_PRESET})",
                args.preset,
                attractor::AttractorConfig::PRESETS.join(", ")
            )
        })?,
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(points) = args.points {
        cfg.precision_points = points;
    }
    let mut att = attractor::Attractor::new(&cfg)?;
    for _ in 0..args.mutate {
        att.mutate_literals()?;
    }
    Ok(att)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut att = build_attractor(&args.source)?;

    if let Some(min) = args.min_occupancy {
        if !att.mutate_until_dense(64, min, args.retries)? {
            tracing::warn!(min, retries = args.retries, "attractor stayed sparse");
        }
    }

    let opts = attractor::RasterOpts {
        width: args.width,
        height: args.height,
        margin_px: args.margin,
        ..attractor::RasterOpts::default()
    };
    let frame = att.rasterize(&opts)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info(args: SourceArgs) -> anyhow::Result<()> {
    let mut att = build_attractor(&args)?;
    for line in att.report()? {
        println!("{line}");
    }
    Ok(())
}

fn cmd_rpn(expr: &str) -> anyhow::Result<()> {
    let rpn = attractor::parse_rpn(expr).with_context(|| format!("convert '{expr}'"))?;
    println!("{}", attractor::rpn_to_string(&rpn));
    Ok(())
}
