use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heightmap::{GeneratedHeightmap, HeightmapEngine, HeightmapRequest, Profile};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// Seeds for pre-generated pools come from [0, POOL_SEED_RANGE)
const POOL_SEED_RANGE: u64 = 1_000_000;

// What gets written to disk: the parameters needed to regenerate
// the map next to the map itself
#[derive(Debug, Serialize, Deserialize)]
pub struct MapRecord {
    pub seed: u64,
    pub size: usize,
    pub octaves: u32,
    pub scale: f64,
    pub island_density: f64,
    // stage flags and tunables; part of what fixes the output
    pub profile: Profile,
    pub pregenerated: bool,
    // row-major, size rows of size values
    pub height_map: Vec<Vec<f64>>,
}

impl MapRecord {
    pub fn new(request: &HeightmapRequest, result: GeneratedHeightmap) -> Self {
        Self {
            seed: result.resolved_seed,
            size: request.size,
            octaves: request.octaves,
            scale: request.scale(),
            island_density: request.island_density,
            profile: request.profile.clone(),
            pregenerated: false,
            height_map: result.heightmap.to_rows(),
        }
    }
}

pub fn write_record(path: &Path, record: &MapRecord) -> Result<()> {
    let json = serde_json::to_string(record)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// Generate `count` maps from `template` with fresh random seeds,
// in parallel, one JSON file each. Returns the written paths.
pub fn run_batch(
    template: &HeightmapRequest,
    count: usize,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = rand::thread_rng();
    let seeds: Vec<u64> = (0..count).map(|_| rng.gen_range(0..POOL_SEED_RANGE)).collect();
    log::info!("pre-generating {} maps", count);

    let engine = HeightmapEngine::new();
    seeds
        .par_iter()
        .enumerate()
        .map(|(i, &seed)| -> Result<PathBuf> {
            log::info!("[{}/{}] generating with seed {}", i + 1, count, seed);
            let request = template.clone().with_seed(seed);
            let result = engine.generate(&request)?;
            let mut record = MapRecord::new(&request, result);
            record.pregenerated = true;

            let path = out_dir.join(format!("map-{:03}-{}.json", i, seed));
            write_record(&path, &record)?;
            Ok(path)
        })
        .collect()
}
