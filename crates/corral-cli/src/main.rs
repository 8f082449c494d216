use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use corral_base::BlockType;
use corral_callback::{
    BarrierBoxCallback, BoxConfig, CallbackRegistry, ConfigSource, DryRunSimulator,
    run_after_reset, run_before_reset,
};
use corral_geometry::FillRegion;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "corral")]
#[command(about = "Plan and dry-run barrier enclosures for Minecraft simulator resets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fill commands for an enclosure.
    Plan(PlanArgs),
    /// Run every configured reset callback against a dry-run simulator.
    Reset(ResetArgs),
}

#[derive(Args)]
struct PlanArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    size: Option<i64>,
    #[arg(long)]
    height: Option<i64>,
    #[arg(long)]
    block: Option<String>,
    #[arg(long)]
    floor: bool,
    #[arg(long)]
    ceiling: bool,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    center_x: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    center_z: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    base_y: i64,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ResetArgs {
    #[arg(long)]
    config: PathBuf,
}

#[derive(Serialize)]
struct Plan<'a> {
    config: &'a BoxConfig,
    regions: Vec<PlannedRegion>,
}

#[derive(Serialize)]
struct PlannedRegion {
    #[serde(flatten)]
    region: FillRegion,
    command: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => plan(args),
        Command::Reset(args) => reset(args),
    }
}

fn plan(args: PlanArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let regions = config
        .generate_regions(args.center_x, args.center_z, args.base_y)
        .context("enclosure does not fit in world coordinates")?;

    if args.json {
        let plan = Plan {
            config: &config,
            regions: regions
                .into_iter()
                .map(|region| PlannedRegion {
                    command: region.command(),
                    region,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for region in &regions {
            println!("{region}");
        }
    }
    Ok(())
}

fn resolve_config(args: &PlanArgs) -> Result<BoxConfig> {
    let base = match &args.config {
        Some(path) => BarrierBoxCallback::create_from_conf(path.as_path())
            .with_context(|| format!("load config {}", path.display()))?
            .map(|callback| *callback.config())
            .unwrap_or_default(),
        None => BoxConfig::default(),
    };

    let block = match &args.block {
        Some(name) => name.clone(),
        None => base.block_type().as_str().to_string(),
    };

    BoxConfig::new(
        args.size.unwrap_or(base.size()),
        args.height.unwrap_or(base.height()),
        &block,
        args.floor || base.include_floor(),
        args.ceiling || base.include_ceiling(),
    )
    .with_context(|| format!("--block expects one of: {}", BlockType::valid_names()))
}

fn reset(args: ResetArgs) -> Result<()> {
    let registry = CallbackRegistry::<DryRunSimulator>::with_builtin();
    let mut callbacks = registry
        .create_all(ConfigSource::from(args.config.clone()))
        .with_context(|| format!("load config {}", args.config.display()))?;
    if callbacks.is_empty() {
        bail!(
            "no reset callback configured in {} (known: {})",
            args.config.display(),
            registry.names().collect::<Vec<_>>().join(", ")
        );
    }

    let mut sim = DryRunSimulator::new();
    run_before_reset(&mut callbacks, &mut sim).context("before_reset failed")?;
    let (obs, info) =
        run_after_reset(&mut callbacks, &mut sim, 0, json!({})).context("after_reset failed")?;

    for command in sim.commands() {
        println!("{command}");
    }
    info!(commands = obs, info = %info, "reset dry-run complete");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
