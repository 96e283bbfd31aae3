use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_SIZE: usize = 128;
pub const DEFAULT_OCTAVES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    #[default]
    Perlin,
    Simplex,
}

// Which optional stages run, and the tunables they use.
// Stages always compose in the order warp → fbm → shift → quantize → mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub warp: bool,
    pub mask: bool,
    pub quantize: bool,
    pub noise: NoiseKind,
    pub persistence: f64,
    pub lacunarity: f64,
    // multiplies the request scale; below 1.0 gives smaller features
    pub scale_factor: f64,
    pub warp_strength: f64,
    // warp field is sampled at `scale * scale_factor * warp_scale_factor`
    pub warp_scale_factor: f64,
    pub warp_octaves: u32,
    pub quantize_step: f64,
}

impl Profile {
    // Plain fBm, no optional stage
    pub fn plain() -> Self {
        Self {
            warp: false,
            mask: false,
            quantize: false,
            noise: NoiseKind::Perlin,
            persistence: 0.5,
            lacunarity: 2.0,
            scale_factor: 1.0,
            warp_strength: 4.0,
            warp_scale_factor: 2.0,
            warp_octaves: 2,
            quantize_step: 0.05,
        }
    }

    // Swirled, higher-frequency islands fading to water at the edges
    pub fn archipelago() -> Self {
        Self {
            warp: true,
            mask: true,
            persistence: 0.55,
            lacunarity: 2.1,
            scale_factor: 0.5,
            ..Self::plain()
        }
    }

    // Discrete elevation bands, no island mask
    pub fn terraced() -> Self {
        Self {
            quantize: true,
            ..Self::plain()
        }
    }

    // Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "plain" => Some(Self::plain()),
            "archipelago" => Some(Self::archipelago()),
            "terraced" => Some(Self::terraced()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("persistence", self.persistence)?;
        positive("lacunarity", self.lacunarity)?;
        positive("scale_factor", self.scale_factor)?;
        if self.warp {
            if self.warp_octaves == 0 {
                return Err(EngineError::invalid("warp_octaves", "must be at least 1"));
            }
            positive("warp_scale_factor", self.warp_scale_factor)?;
            if !self.warp_strength.is_finite() {
                return Err(EngineError::invalid("warp_strength", "must be finite"));
            }
        }
        if self.quantize {
            positive("quantize_step", self.quantize_step)?;
        }
        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::archipelago()
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            name,
            format!("must be a positive number, got {}", value),
        ))
    }
}

// Everything one synthesis call needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapRequest {
    pub size: usize,
    pub octaves: u32,
    // None means size / 4
    pub scale: Option<f64>,
    // None means the engine draws one and reports it
    pub seed: Option<u64>,
    pub island_density: f64,
    pub profile: Profile,
}

impl Default for HeightmapRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_OCTAVES)
    }
}

impl HeightmapRequest {
    pub fn new(size: usize, octaves: u32) -> Self {
        Self {
            size,
            octaves,
            scale: None,
            seed: None,
            island_density: 0.0,
            profile: Profile::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_island_density(mut self, density: f64) -> Self {
        self.island_density = density;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale.unwrap_or(self.size as f64 / 4.0)
    }

    // Frequency control actually fed to the sampler
    pub fn effective_scale(&self) -> f64 {
        self.scale() * self.profile.scale_factor
    }

    // Checked before any computation; nothing is produced on failure
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(EngineError::invalid("size", "must be at least 1"));
        }
        if self.octaves == 0 {
            return Err(EngineError::invalid("octaves", "must be at least 1"));
        }
        positive("scale", self.scale())?;
        if !self.island_density.is_finite() {
            return Err(EngineError::invalid("island_density", "must be finite"));
        }
        self.profile.validate()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::EngineError;

    use super::{HeightmapRequest, NoiseKind, Profile};

    fn invalid_name(req: &HeightmapRequest) -> Option<&'static str> {
        match req.validate() {
            Err(EngineError::InvalidParameter { name, .. }) => Some(name),
            Ok(()) => None,
        }
    }

    #[test]
    fn scale_defaults_to_quarter_size() {
        let req = HeightmapRequest::new(64, 2);
        assert_eq!(req.scale(), 16.0);
        assert_eq!(req.with_scale(5.0).scale(), 5.0);
    }

    #[test]
    fn archipelago_halves_effective_scale() {
        let req = HeightmapRequest::new(64, 2).with_profile(Profile::archipelago());
        assert_eq!(req.effective_scale(), 8.0);
        let req = req.with_profile(Profile::plain());
        assert_eq!(req.effective_scale(), 16.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(invalid_name(&HeightmapRequest::new(0, 2)), Some("size"));
        assert_eq!(invalid_name(&HeightmapRequest::new(8, 0)), Some("octaves"));
        assert_eq!(
            invalid_name(&HeightmapRequest::new(8, 2).with_scale(0.0)),
            Some("scale")
        );
        assert_eq!(
            invalid_name(&HeightmapRequest::new(8, 2).with_scale(-3.0)),
            Some("scale")
        );
        assert_eq!(
            invalid_name(&HeightmapRequest::new(8, 2).with_island_density(f64::NAN)),
            Some("island_density")
        );
        assert_eq!(invalid_name(&HeightmapRequest::new(8, 2)), None);
    }

    #[test]
    fn rejects_bad_profile() {
        let mut profile = Profile::terraced();
        profile.quantize_step = 0.0;
        let req = HeightmapRequest::new(8, 2).with_profile(profile);
        assert_eq!(invalid_name(&req), Some("quantize_step"));

        let mut profile = Profile::archipelago();
        profile.warp_octaves = 0;
        let req = HeightmapRequest::new(8, 2).with_profile(profile);
        assert_eq!(invalid_name(&req), Some("warp_octaves"));
    }

    #[test]
    fn warp_settings_ignored_when_warp_off() {
        let mut profile = Profile::plain();
        profile.warp_octaves = 0;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn presets_by_name() {
        assert_eq!(Profile::preset("plain"), Some(Profile::plain()));
        assert_eq!(Profile::preset("terraced").map(|p| p.quantize), Some(true));
        assert!(Profile::preset("volcano").is_none());
    }

    #[test]
    fn partial_profile_fills_defaults() {
        let p: Profile = serde_json::from_str(r#"{"mask": false, "noise": "simplex"}"#).unwrap();
        assert!(!p.mask);
        assert!(p.warp);
        assert_eq!(p.noise, NoiseKind::Simplex);
        assert_eq!(p.persistence, 0.55);
    }

    #[test]
    fn request_defaults() {
        let req: HeightmapRequest = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(req.size, 128);
        assert_eq!(req.octaves, 4);
        assert_eq!(req.seed, Some(9));
        assert_eq!(req.island_density, 0.0);
        assert_eq!(req.profile, Profile::archipelago());
    }
}
