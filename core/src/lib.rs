// heightmap holds the seeded noise, fractal, warp and mask stages
// plus the engine that composes them into a size×size elevation grid
pub mod compositor;
pub mod domain_warp;
pub mod engine;
pub mod error;
pub mod fractal2;
pub mod heightmap;
pub mod mask;
pub mod perlin2;
pub mod profile;
pub mod seed;
pub mod simplex2;
pub mod utils;

pub use domain_warp::DomainWarp2D;
pub use engine::{GeneratedHeightmap, HeightmapEngine};
pub use error::EngineError;
pub use fractal2::Fbm;
pub use heightmap::{Heightmap, HeightmapStats};
pub use mask::island_mask;
pub use perlin2::Perlin2D;
pub use profile::{HeightmapRequest, NoiseKind, Profile};
pub use seed::SeedState;
pub use simplex2::Simplex2D;

// Seeded coherent noise sampled at arbitrary real coordinates.
// Implementations must be continuous, return values in [-1.0, 1.0]
// and give identical output for identical input.
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

// Build the noise field selected by a profile
pub fn noise_field(kind: NoiseKind, seed: u64) -> Box<dyn NoiseField> {
    match kind {
        NoiseKind::Perlin => Box::new(Perlin2D::new(seed)),
        NoiseKind::Simplex => Box::new(Simplex2D::new(seed)),
    }
}
