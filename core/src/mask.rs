use crate::heightmap::Heightmap;
use crate::utils::{grid_coord, smoothstep};

// Radial island falloff: 1 at the centre, 0 on and beyond the unit
// circle touching the grid edges, C¹ in between.
// Pure function of `size`; independent of the seed.
pub fn island_mask(size: usize) -> Heightmap {
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        let yy = grid_coord(y, size);
        for x in 0..size {
            let xx = grid_coord(x, size);
            data.push(mask_value(xx, yy));
        }
    }
    Heightmap::from_vec(size, data)
}

// Mask at normalized coordinates (xx, yy) in [−1, 1]²
#[inline]
pub fn mask_value(xx: f64, yy: f64) -> f64 {
    let d = (xx * xx + yy * yy).sqrt();
    smoothstep(1.0 - d.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::{island_mask, mask_value};

    #[test]
    fn corners_are_zero() {
        for size in [2, 3, 16, 33, 64] {
            let m = island_mask(size);
            let last = size - 1;
            for (y, x) in [(0, 0), (0, last), (last, 0), (last, last)] {
                assert_eq!(m.get(y, x), 0.0, "corner ({}, {}) of {}", y, x, size);
            }
        }
    }

    #[test]
    fn odd_centre_is_one() {
        let m = island_mask(33);
        assert_eq!(m.get(16, 16), 1.0);
    }

    #[test]
    fn even_centre_is_nearly_one() {
        let m = island_mask(64);
        // The centre falls between pixels; the four nearest are equal and close to 1
        let c = m.get(32, 32);
        assert!(c > 0.99);
        assert_eq!(c, m.get(31, 31));
        assert_eq!(c, m.get(31, 32));
        assert_eq!(c, m.get(32, 31));
    }

    #[test]
    fn single_pixel_is_centre() {
        assert_eq!(island_mask(1).get(0, 0), 1.0);
    }

    #[test]
    fn values_in_unit_range() {
        let m = island_mask(48);
        assert!(m.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn falloff_is_monotone_along_radius() {
        let mut prev = mask_value(0.0, 0.0);
        for i in 1..=100 {
            let v = mask_value(i as f64 / 100.0, 0.0);
            assert!(v <= prev);
            prev = v;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn smooth_at_the_coast() {
        // Slope vanishes at d = 1, so no visible band at the boundary
        let just_inside = mask_value(0.999, 0.0);
        assert!(just_inside < 1e-5);
    }

    #[test]
    fn symmetric() {
        let m = island_mask(21);
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(m.get(y, x), m.get(x, y));
                assert_eq!(m.get(y, x), m.get(20 - y, x));
            }
        }
    }
}
