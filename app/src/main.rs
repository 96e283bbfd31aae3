mod export;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use heightmap::{HeightmapEngine, HeightmapRequest, Profile};

use crate::export::{MapRecord, run_batch, write_record};

#[derive(Parser, Debug)]
#[command(name = "heightmap")]
#[command(about = "Synthesize seeded island heightmaps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one heightmap
    Generate(GenerateArgs),
    /// Pre-generate a pool of heightmaps with random seeds
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Grid side length; output is size×size
    #[arg(long, default_value = "128")]
    size: usize,

    /// Number of fBm octaves
    #[arg(long, default_value = "4")]
    octaves: u32,

    /// Feature scale (defaults to size / 4)
    #[arg(long)]
    scale: Option<f64>,

    /// Seed; drawn at random and reported when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Shifts the landmass threshold, positive means more land
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    island_density: f64,

    /// Preset: plain, archipelago or terraced
    #[arg(long, default_value = "archipelago")]
    profile: String,

    /// TOML file overriding the preset
    #[arg(long)]
    profile_file: Option<PathBuf>,

    /// Write the result as JSON
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Number of maps to generate
    #[arg(long, default_value = "5")]
    count: usize,

    #[arg(long, default_value = "128")]
    size: usize,

    #[arg(long, default_value = "4")]
    octaves: u32,

    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    island_density: f64,

    /// Directory receiving one JSON file per map
    #[arg(long)]
    out_dir: PathBuf,
}

fn load_profile(preset: &str, file: Option<&PathBuf>) -> Result<Profile> {
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        let profile: Profile =
            toml::from_str(&text).with_context(|| format!("parsing profile {}", path.display()))?;
        return Ok(profile);
    }
    match Profile::preset(preset) {
        Some(p) => Ok(p),
        None => bail!(
            "unknown profile `{}` (expected plain, archipelago or terraced)",
            preset
        ),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let profile = load_profile(&args.profile, args.profile_file.as_ref())?;
    let mut request = HeightmapRequest::new(args.size, args.octaves)
        .with_island_density(args.island_density)
        .with_profile(profile);
    request.scale = args.scale;
    request.seed = args.seed;

    let start = Instant::now();
    let result = HeightmapEngine::new().generate(&request)?;
    let elapsed = start.elapsed().as_secs_f32();

    let stats = result.heightmap.stats();
    log::info!(
        "generated {}×{} in {:.3}s, seed={}, min={:.3}, max={:.3}, mean={:.3}",
        args.size,
        args.size,
        elapsed,
        result.resolved_seed,
        stats.min,
        stats.max,
        stats.mean
    );
    println!("seed: {}", result.resolved_seed);

    if let Some(path) = args.out {
        let record = MapRecord::new(&request, result);
        write_record(&path, &record)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let template = HeightmapRequest::new(args.size, args.octaves)
        .with_island_density(args.island_density);
    let written = run_batch(&template, args.count, &args.out_dir)?;
    log::info!("added {} maps to {}", written.len(), args.out_dir.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Batch(args) => batch(args),
    }
}
