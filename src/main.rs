mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use curve_blend::config::BlendConfig;
use curve_blend::curve::{self, random_curve, write_points, Curve};
use curve_blend::scoring::{
    format_table, InputPolicy, OutputPolicy, ScoreSettings, TableKind, WeightSide,
};
use curve_blend::{evaluate, BlendPipeline, BlendSession};

#[derive(Parser)]
#[command(name = "curve-blend", about = "Bezier-weighted views/earnings score blender")]
struct Cli {
    /// TOML config file (defaults to $BLEND_CONFIG_PATH or config/blend.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score one (views, earnings) pair
    Score(ScoreArgs),
    /// Print the 100x100 score grid
    Heatmap(HeatmapArgs),
    /// Print a debug sweep through the grid
    Table(TableArgs),
    /// Print the sampled curve lookup table
    Lut(CurveArgs),
    /// Generate a random curve
    Random(RandomArgs),
    /// List built-in curves
    Presets,
    /// Write the default config file
    InitConfig(InitConfigArgs),
    /// Serve the HTTP API and the static web client
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct CurveArgs {
    /// JSON file holding an array of {x, y} control points
    #[arg(long, conflicts_with_all = ["preset", "random"])]
    points: Option<PathBuf>,
    #[arg(long, conflicts_with = "random")]
    preset: Option<String>,
    /// Seed for a random curve
    #[arg(long)]
    random: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
struct ControlArgs {
    /// Axis supplying the views weight: views | earnings
    #[arg(long)]
    side: Option<String>,
    #[arg(long, conflicts_with = "no_invert")]
    invert: bool,
    #[arg(long, conflicts_with = "invert")]
    no_invert: bool,
    /// pass-through | clamp
    #[arg(long)]
    output: Option<String>,
    /// Reject out-of-range inputs instead of clamping them
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct ScoreArgs {
    #[command(flatten)]
    curve: CurveArgs,
    #[command(flatten)]
    controls: ControlArgs,
    #[arg(long)]
    views: Option<i32>,
    #[arg(long)]
    earnings: Option<i32>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct HeatmapArgs {
    #[command(flatten)]
    curve: CurveArgs,
    #[command(flatten)]
    controls: ControlArgs,
    /// csv | json
    #[arg(long, default_value = "csv")]
    format: String,
}

#[derive(Args, Debug, Clone)]
struct TableArgs {
    #[command(flatten)]
    curve: CurveArgs,
    #[command(flatten)]
    controls: ControlArgs,
    /// diagonal | cross
    #[arg(long, default_value = "diagonal")]
    kind: String,
}

#[derive(Args, Debug, Clone)]
struct RandomArgs {
    #[arg(long)]
    seed: Option<u64>,
    /// Write the points to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long)]
    path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[command(flatten)]
    curve: CurveArgs,
    #[command(flatten)]
    controls: ControlArgs,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = BlendConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    let command = cli.command.unwrap_or(Command::Score(ScoreArgs::default()));

    match command {
        Command::Score(args) => run_score(&config, args),
        Command::Heatmap(args) => run_heatmap(&config, args),
        Command::Table(args) => run_table(&config, args),
        Command::Lut(args) => run_lut(&config, args),
        Command::Random(args) => run_random(args),
        Command::Presets => run_presets(),
        Command::InitConfig(args) => {
            let path = args
                .path
                .or(config_path)
                .unwrap_or_else(|| PathBuf::from("config/blend.toml"));
            BlendConfig::default().write(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Command::Serve(args) => run_serve(&config, args).await,
    }
}

fn run_score(config: &BlendConfig, args: ScoreArgs) -> Result<(), String> {
    let curve = resolve_curve(config, &args.curve)?;
    let settings = resolve_settings(config, &args.controls)?;
    let views = args.views.unwrap_or(config.blend.views);
    let earnings = args.earnings.unwrap_or(config.blend.earnings);

    if args.json {
        let evaluation =
            evaluate(&curve, settings, views, earnings).map_err(|err| err.to_string())?;
        let payload = serde_json::to_string_pretty(&evaluation)
            .map_err(|err| format!("failed to serialize evaluation: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    let pipeline = BlendPipeline::new(&curve, settings);
    let score = pipeline.try_score(views, earnings).map_err(|err| err.to_string())?;
    let weights = pipeline.weights(earnings);
    println!("Score: {}", score);
    println!(
        "Inputs: views {} | earnings {}",
        settings.range.clamp(views),
        settings.range.clamp(earnings)
    );
    println!(
        "Weights: views {:.4} | earnings {:.4} ({}-primary)",
        weights.views,
        weights.earnings,
        settings.weight_side.label()
    );
    println!(
        "Invert: {} | curve {} ({} points)",
        settings.invert,
        curve.fingerprint(),
        curve.len()
    );
    Ok(())
}

fn run_heatmap(config: &BlendConfig, args: HeatmapArgs) -> Result<(), String> {
    let curve = resolve_curve(config, &args.curve)?;
    let settings = resolve_settings(config, &args.controls)?;
    match args.format.to_lowercase().as_str() {
        "csv" => {
            let matrix = BlendPipeline::new(&curve, settings).heatmap();
            print!("{}", matrix.to_csv());
        }
        "json" => {
            let evaluation = evaluate(&curve, settings, config.blend.views, config.blend.earnings)
                .map_err(|err| err.to_string())?;
            let payload = serde_json::to_string(&evaluation)
                .map_err(|err| format!("failed to serialize heatmap: {}", err))?;
            println!("{}", payload);
        }
        other => return Err(format!("invalid heatmap format: {}", other)),
    }
    Ok(())
}

fn run_table(config: &BlendConfig, args: TableArgs) -> Result<(), String> {
    let curve = resolve_curve(config, &args.curve)?;
    let settings = resolve_settings(config, &args.controls)?;
    let kind = TableKind::from_str(&args.kind)
        .ok_or_else(|| format!("invalid table kind: {}", args.kind))?;
    let rows = BlendPipeline::new(&curve, settings).table(kind);
    print!("{}", format_table(&rows));
    Ok(())
}

fn run_lut(config: &BlendConfig, args: CurveArgs) -> Result<(), String> {
    let curve = resolve_curve(config, &args)?;
    let lut = curve::Lut::sample(&curve);
    for (idx, point) in lut.samples().iter().enumerate() {
        println!("{:>3}  {:.6}  {:.6}", idx, point.x, point.y);
    }
    Ok(())
}

fn run_random(args: RandomArgs) -> Result<(), String> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let curve = random_curve(&mut rng);
    match args.out {
        Some(path) => {
            write_points(&curve, &path).map_err(|err| err.to_string())?;
            println!("Wrote {} points to {}", curve.len(), path.display());
        }
        None => {
            let payload = serde_json::to_string_pretty(&curve)
                .map_err(|err| format!("failed to serialize points: {}", err))?;
            println!("{}", payload);
        }
    }
    Ok(())
}

fn run_presets() -> Result<(), String> {
    for &name in curve::preset_names() {
        let curve = curve::preset(name).map_err(|err| err.to_string())?;
        let marker = if name == curve::DEFAULT_PRESET { " (default)" } else { "" };
        println!("{}: {} points{}", name, curve.len(), marker);
    }
    Ok(())
}

async fn run_serve(config: &BlendConfig, args: ServeArgs) -> Result<(), String> {
    let curve = resolve_curve(config, &args.curve)?;
    let settings = resolve_settings(config, &args.controls)?;
    let session = BlendSession::new(curve, settings, config.blend.views, config.blend.earnings);

    server::serve(server::ServeOptions {
        host: args.host.unwrap_or_else(|| config.server.host.clone()),
        port: args.port.unwrap_or(config.server.port),
        web_root: args
            .web_root
            .unwrap_or_else(|| config.server.web_root.clone()),
        session,
    })
    .await
}

fn resolve_curve(config: &BlendConfig, args: &CurveArgs) -> Result<Curve, String> {
    if let Some(path) = args.points.as_ref() {
        return curve::load_points(path).map_err(|err| err.to_string());
    }
    if let Some(seed) = args.random {
        return Ok(random_curve(&mut StdRng::seed_from_u64(seed)));
    }
    let name = args.preset.as_deref().unwrap_or(config.blend.preset.as_str());
    curve::preset(name).map_err(|err| err.to_string())
}

fn resolve_settings(config: &BlendConfig, args: &ControlArgs) -> Result<ScoreSettings, String> {
    let mut settings = config.blend.to_settings()?;
    if let Some(side) = args.side.as_deref() {
        settings.weight_side =
            WeightSide::from_str(side).ok_or_else(|| format!("invalid weight side: {}", side))?;
    }
    if args.invert {
        settings.invert = true;
    }
    if args.no_invert {
        settings.invert = false;
    }
    if let Some(output) = args.output.as_deref() {
        settings.output = OutputPolicy::from_str(output)
            .ok_or_else(|| format!("invalid output policy: {}", output))?;
    }
    if args.strict {
        settings.input = InputPolicy::Reject;
    }
    Ok(settings)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curve_blend=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
