use crate::error::Result;
use crate::fractal2::Fbm;
use crate::profile::Profile;
use crate::seed::SeedState;

// Warp field persistence is fixed; only its octave count is tunable
const WARP_PERSISTENCE: f64 = 0.5;
const WARP_LACUNARITY: f64 = 2.0;

// Displaces terrain sampling coordinates with a second, lower-frequency
// fBm field that has its own seed and offsets
pub struct DomainWarp2D {
    field: Fbm,
    offset_x: f64,
    offset_y: f64,
    scale: f64, // warp sampling scale, larger than the terrain's
    strength: f64,
}

impl DomainWarp2D {
    // Returns None when the seed state carries no warp offsets
    pub fn from_seed(state: &SeedState, profile: &Profile, eff_scale: f64) -> Result<Option<Self>> {
        let Some(offsets) = state.warp else {
            return Ok(None);
        };
        let field = Fbm::with_params(
            crate::noise_field(profile.noise, state.warp_seed()),
            profile.warp_octaves,
            WARP_PERSISTENCE,
            WARP_LACUNARITY,
        )?;
        Ok(Some(Self {
            field,
            offset_x: offsets.x as f64,
            offset_y: offsets.y as f64,
            scale: eff_scale * profile.warp_scale_factor,
            strength: profile.warp_strength,
        }))
    }

    // Scalar displacement for pixel (px, py), within ±strength
    #[inline]
    pub fn displacement(&self, px: f64, py: f64) -> f64 {
        let wx = (px + self.offset_x) / self.scale;
        let wy = (py + self.offset_y) / self.scale;
        self.strength * self.field.get(wx, wy)
    }

    // Shift the unwarped terrain point (nx, ny) of pixel (px, py).
    // Both axes move by the same amount.
    #[inline]
    pub fn warp(&self, px: f64, py: f64, nx: f64, ny: f64) -> (f64, f64) {
        let q = self.displacement(px, py);
        (nx + q, ny + q)
    }
}
