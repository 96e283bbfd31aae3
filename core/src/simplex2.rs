use crate::NoiseField;
use crate::perlin2::permutation_table;

// Single-octave 2D Simplex noise.
// Simplex divides space into triangles rather than squares,
// which gives better isotropy than the Perlin lattice.
pub struct Simplex2D {
    perm: [u8; 512],
}

// Gradient directions picked by hash % 12
const GRAD3: [(i8, i8); 12] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

impl Simplex2D {
    pub fn new(seed: u64) -> Self {
        Self {
            perm: permutation_table(seed ^ 0x1234_5678_9ABC_DEF0_u64),
        }
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    // Falloff-weighted contribution of one simplex corner
    #[inline]
    fn corner(gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t_sq = t * t;
            t_sq * t_sq * Self::dot(GRAD3[gi], x, y)
        } else {
            0.0
        }
    }

    // Raw 2D Simplex noise at (xin, yin), roughly [−1, 1]
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skew square cells into rhombi of equilateral triangles, and back
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        let s = (xin + yin) * F2;
        // Cell corner kept in floating point; integer sums overflow for huge inputs
        let i = (xin + s).floor();
        let j = (yin + s).floor();

        let t = (i + j) * G2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // Lower or upper triangle of the cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let n0 = Self::corner(gi0, x0, y0);
        let n1 = Self::corner(gi1, x1, y1);
        let n2 = Self::corner(gi2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }
}

impl NoiseField for Simplex2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // the (1, 2) gradients can overshoot slightly
        self.raw_noise(x, y).clamp(-1.0, 1.0)
    }
}
