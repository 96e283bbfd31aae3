use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Seeds drawn when the caller gives none come from [0, SEED_RANGE)
pub const SEED_RANGE: u64 = 10_000;
// Coordinate offsets come from [0, OFFSET_RANGE)
pub const OFFSET_RANGE: u32 = 100_000;

// Offsets for the warp field, drawn after the terrain offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpOffsets {
    pub x: u32,
    pub y: u32,
}

// Per-request seed material. Owned by a single synthesis call,
// never shared with another request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedState {
    pub seed: u64,
    pub offset_x: u32,
    pub offset_y: u32,
    pub warp: Option<WarpOffsets>,
}

impl SeedState {
    // Resolve `seed` (drawing one if absent) and derive the offsets.
    // The draw order offset_x, offset_y, warp x, warp y is fixed:
    // changing it changes every heightmap for a given seed.
    pub fn derive(seed: Option<u64>, with_warp: bool) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let drawn = rand::thread_rng().gen_range(0..SEED_RANGE);
            log::info!("no seed given, drew seed={}", drawn);
            drawn
        });

        // Fresh stream per request; no global generator is touched
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let offset_x = rng.gen_range(0..OFFSET_RANGE);
        let offset_y = rng.gen_range(0..OFFSET_RANGE);
        let warp = with_warp.then(|| WarpOffsets {
            x: rng.gen_range(0..OFFSET_RANGE),
            y: rng.gen_range(0..OFFSET_RANGE),
        });

        Self {
            seed,
            offset_x,
            offset_y,
            warp,
        }
    }

    // Seed for the warp noise field, kept apart from the terrain field's
    pub fn warp_seed(&self) -> u64 {
        self.seed.wrapping_add(42)
    }
}
