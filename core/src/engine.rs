use serde::{Deserialize, Serialize};

use crate::compositor::Compositor;
use crate::error::Result;
use crate::heightmap::Heightmap;
use crate::profile::HeightmapRequest;
use crate::seed::SeedState;

// Engine output. `resolved_seed` reproduces the run even when the
// request carried no seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedHeightmap {
    pub heightmap: Heightmap,
    pub resolved_seed: u64,
}

// Entry point for every caller. Holds no per-request state: each call
// derives its own seed stream and noise fields and drops them on return.
#[derive(Debug, Clone, Copy)]
pub struct HeightmapEngine {
    parallel: bool,
}

impl Default for HeightmapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightmapEngine {
    // Rows are filled on the rayon pool
    pub fn new() -> Self {
        Self { parallel: true }
    }

    // Rows are filled on the calling thread; output is bit-identical
    pub fn serial() -> Self {
        Self { parallel: false }
    }

    pub fn generate(&self, request: &HeightmapRequest) -> Result<GeneratedHeightmap> {
        log::debug!(
            "generating heightmap: size={}, octaves={}, seed={:?}, density={}",
            request.size,
            request.octaves,
            request.seed,
            request.island_density
        );
        request.validate()?;

        log::trace!("computing offsets");
        let state = SeedState::derive(request.seed, request.profile.warp);

        log::trace!("building noise fields for seed={}", state.seed);
        let compositor = Compositor::new(request, &state)?;

        log::trace!("compositing {}×{} grid", request.size, request.size);
        let heightmap = if self.parallel {
            compositor.compose()
        } else {
            compositor.compose_serial()
        };

        log::debug!("heightmap done: seed={}", state.seed);
        Ok(GeneratedHeightmap {
            heightmap,
            resolved_seed: state.seed,
        })
    }
}
