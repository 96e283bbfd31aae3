use rayon::prelude::*;

use crate::domain_warp::DomainWarp2D;
use crate::error::Result;
use crate::fractal2::Fbm;
use crate::heightmap::Heightmap;
use crate::mask::island_mask;
use crate::profile::HeightmapRequest;
use crate::seed::SeedState;
use crate::utils::quantize;

// Per-request pipeline state. Built once, then shared read-only
// by every worker filling rows.
pub struct Compositor {
    size: usize,
    terrain: Fbm,
    warp: Option<DomainWarp2D>,
    mask: Option<Heightmap>,
    offset_x: f64,
    offset_y: f64,
    eff_scale: f64,
    island_density: f64,
    quantize_step: Option<f64>,
}

impl Compositor {
    // `request` must already be validated
    pub fn new(request: &HeightmapRequest, state: &SeedState) -> Result<Self> {
        let profile = &request.profile;
        let eff_scale = request.effective_scale();

        let terrain = Fbm::with_params(
            crate::noise_field(profile.noise, state.seed),
            request.octaves,
            profile.persistence,
            profile.lacunarity,
        )?;
        let warp = if profile.warp {
            DomainWarp2D::from_seed(state, profile, eff_scale)?
        } else {
            None
        };
        let mask = profile.mask.then(|| island_mask(request.size));

        Ok(Self {
            size: request.size,
            terrain,
            warp,
            mask,
            offset_x: state.offset_x as f64,
            offset_y: state.offset_y as f64,
            eff_scale,
            island_density: request.island_density,
            quantize_step: profile.quantize.then_some(profile.quantize_step),
        })
    }

    // Elevation of pixel (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> f64 {
        let px = x as f64;
        let py = y as f64;
        let mut nx = (px + self.offset_x) / self.eff_scale;
        let mut ny = (py + self.offset_y) / self.eff_scale;

        if let Some(warp) = &self.warp {
            (nx, ny) = warp.warp(px, py, nx, ny);
        }

        let val = self.terrain.get(nx, ny);
        // [−1, 1] → [0, 1], then bias by density
        let mut elevation = (val + 1.0 + self.island_density) / 2.0;

        if let Some(step) = self.quantize_step {
            elevation = quantize(elevation, step);
        }

        if let Some(mask) = &self.mask {
            elevation = (elevation * mask.get(y, x)).clamp(0.0, 1.0);
        }

        elevation
    }

    fn fill_row(&self, y: usize, row: &mut [f64]) {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = self.pixel(x, y);
        }
    }

    pub fn compose(&self) -> Heightmap {
        let mut data = vec![0.0; self.size * self.size];
        data.par_chunks_mut(self.size)
            .enumerate()
            .for_each(|(y, row)| self.fill_row(y, row));
        Heightmap::from_vec(self.size, data)
    }

    pub fn compose_serial(&self) -> Heightmap {
        let mut data = vec![0.0; self.size * self.size];
        for (y, row) in data.chunks_mut(self.size).enumerate() {
            self.fill_row(y, row);
        }
        Heightmap::from_vec(self.size, data)
    }
}
