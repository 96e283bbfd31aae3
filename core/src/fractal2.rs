use crate::NoiseField;
use crate::error::{EngineError, Result};

pub const DEFAULT_PERSISTENCE: f64 = 0.5;
pub const DEFAULT_LACUNARITY: f64 = 2.0;

// Fractional Brownian motion: octaves of one noise field summed with
// decaying amplitude and growing frequency, normalized back to [−1, 1]
pub struct Fbm {
    field: Box<dyn NoiseField>,
    octaves: u32,
    persistence: f64, // amplitude scaling per octave
    lacunarity: f64,  // frequency scaling per octave
}

impl Fbm {
    pub fn new(field: Box<dyn NoiseField>, octaves: u32) -> Result<Self> {
        Self::with_params(field, octaves, DEFAULT_PERSISTENCE, DEFAULT_LACUNARITY)
    }

    pub fn with_params(
        field: Box<dyn NoiseField>,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> Result<Self> {
        if octaves == 0 {
            return Err(EngineError::invalid("octaves", "must be at least 1"));
        }
        if !(persistence.is_finite() && persistence > 0.0) {
            return Err(EngineError::invalid(
                "persistence",
                format!("must be a positive number, got {}", persistence),
            ));
        }
        if !(lacunarity.is_finite() && lacunarity > 0.0) {
            return Err(EngineError::invalid(
                "lacunarity",
                format!("must be a positive number, got {}", lacunarity),
            ));
        }

        Ok(Self {
            field,
            octaves,
            persistence,
            lacunarity,
        })
    }

    // Multi-octave value at (x, y), within [−1, 1].
    // Octaves whose amplitude underflows to zero or whose sampling point
    // leaves the finite range add nothing and are left out of the
    // normalization too.
    pub fn get(&self, x: f64, y: f64) -> f64 {
        let mut amplitude: f64 = 1.0;
        let mut freq = 1.0;
        let mut total = 0.0;
        let mut max_amp = 0.0; // sum of amplitudes actually used

        for _ in 0..self.octaves {
            let sx = x * freq;
            let sy = y * freq;
            let next_max = max_amp + amplitude;
            // the simplex skew adds the two coordinates, keep headroom for it
            let reach = 2.0 * (sx.abs() + sy.abs());
            if amplitude == 0.0
                || !amplitude.is_finite()
                || !next_max.is_finite()
                || !reach.is_finite()
            {
                break;
            }
            total += self.field.sample(sx, sy) * amplitude;
            max_amp = next_max;
            amplitude *= self.persistence;
            freq *= self.lacunarity;
        }

        if max_amp == 0.0 {
            return 0.0;
        }
        (total / max_amp).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::EngineError;
    use crate::{NoiseField, Perlin2D, Simplex2D};

    use super::Fbm;

    // Constant field to check the normalization by hand
    struct Flat(f64);

    impl NoiseField for Flat {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn fbm_rejects_zero_octaves() {
        let err = Fbm::new(Box::new(Perlin2D::new(1)), 0).err();
        assert!(matches!(
            err,
            Some(EngineError::InvalidParameter { name: "octaves", .. })
        ));
    }

    #[test]
    fn fbm_rejects_bad_persistence() {
        assert!(Fbm::with_params(Box::new(Perlin2D::new(1)), 3, 0.0, 2.0).is_err());
        assert!(Fbm::with_params(Box::new(Perlin2D::new(1)), 3, f64::NAN, 2.0).is_err());
        assert!(Fbm::with_params(Box::new(Perlin2D::new(1)), 3, 0.5, -2.0).is_err());
    }

    #[test]
    fn fbm_normalizes_by_amplitude_sum() {
        // Every octave returns the max, so the normalized sum is exactly 1
        let f = Fbm::with_params(Box::new(Flat(1.0)), 6, 0.5, 2.0).unwrap();
        assert!((f.get(3.0, 4.0) - 1.0).abs() < 1e-12);

        let f = Fbm::with_params(Box::new(Flat(-0.5)), 3, 0.55, 2.1).unwrap();
        assert!((f.get(0.0, 0.0) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn fbm_single_octave_matches_field() {
        let f = Fbm::new(Box::new(Perlin2D::new(11)), 1).unwrap();
        let p = Perlin2D::new(11);
        for &(x, y) in &[(0.25, 0.75), (12.3, -4.1), (1000.5, 3.3)] {
            assert_eq!(f.get(x, y).to_bits(), p.sample(x, y).to_bits());
        }
    }

    #[test]
    fn fbm_range_many_octaves() {
        let f = Fbm::with_params(Box::new(Simplex2D::new(0)), 8, 0.55, 2.1).unwrap();
        for i in 0..500 {
            let v = f.get(i as f64 * 0.37, i as f64 * -0.11);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn fbm_stays_finite_with_huge_octave_count() {
        // frequency overflows and amplitude underflows long before 1200
        let f = Fbm::new(Box::new(Perlin2D::new(1)), 1200).unwrap();
        for i in 0..200 {
            let v = f.get(i as f64 * 0.37 + 0.1, i as f64 * 0.23 + 5.0);
            assert!((-1.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn fbm_stays_finite_with_huge_lacunarity() {
        let f = Fbm::with_params(Box::new(Perlin2D::new(3)), 3, 0.5, 1e200).unwrap();
        for i in 0..100 {
            let v = f.get(i as f64 * 1.7 + 0.3, i as f64 * 0.9 + 0.6);
            assert!((-1.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn fbm_stays_finite_with_huge_persistence() {
        let f = Fbm::with_params(Box::new(Flat(1.0)), 10, 1e200, 2.0).unwrap();
        let v = f.get(0.5, 0.5);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fbm_simplex_survives_frequency_overflow() {
        let f = Fbm::with_params(Box::new(Simplex2D::new(2)), 1200, 0.5, 2.0).unwrap();
        for i in 0..100 {
            let v = f.get(i as f64 * 0.51 + 0.2, i as f64 * 0.13 + 1.0);
            assert!((-1.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn fbm_non_finite_input_is_flat() {
        let f = Fbm::new(Box::new(Perlin2D::new(1)), 4).unwrap();
        assert_eq!(f.get(f64::INFINITY, 0.0), 0.0);
    }

    #[test]
    fn fbm_determinism() {
        let a = Fbm::new(Box::new(Perlin2D::new(42)), 4).unwrap();
        let b = Fbm::new(Box::new(Perlin2D::new(42)), 4).unwrap();
        assert_eq!(a.get(5.5, 6.6).to_bits(), b.get(5.5, 6.6).to_bits());
    }
}
