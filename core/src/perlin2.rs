use crate::NoiseField;

// Single-octave 2D Perlin gradient noise over a seeded permutation table.
// Octave accumulation lives in `Fbm`.
pub struct Perlin2D {
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Perlin2D {
    pub fn new(seed: u64) -> Self {
        Self {
            perm: permutation_table(seed ^ 0xDEADBEEFCAFEBABE_u64),
        }
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1,
    // so neighbouring cells join without visible creases
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of the diagonal gradients (±1, ±1) from the hash
    // and dot it with the offset (x, y)
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 8 { y } else { x };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    // Raw single-octave noise at (x, y); gradients of length √2 keep it in [−1, 1]
    fn noise(&self, x: f64, y: f64) -> f64 {
        // Unit square containing the point; `& 255` also wraps negatives
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        // Position inside the square
        let xf = x - x0;
        let yf = y - y0;
        let u = Self::fade(xf);
        let v = Self::fade(yf);

        // Hash the four corners; perm has 512 entries so +1 never overflows
        let a = self.perm[xi] as usize + yi;
        let b = self.perm[xi + 1] as usize + yi;
        let aa = self.perm[a];
        let ab = self.perm[a + 1];
        let ba = self.perm[b];
        let bb = self.perm[b + 1];

        let x1 = Self::lerp(Self::grad(aa, xf, yf), Self::grad(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }
}

impl NoiseField for Perlin2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise(x, y).clamp(-1.0, 1.0)
    }
}

// Shuffle 0..256 with a xorshift stream and duplicate it into 512 entries,
// so lookups like perm[i + 1] never need a modulo
pub(crate) fn permutation_table(state: u64) -> [u8; 512] {
    let mut p: Vec<u8> = (0..=255).collect();
    // xorshift gets stuck on zero
    let mut x = if state == 0 { 0x9E37_79B9_7F4A_7C15 } else { state };
    let mut rng = || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };
    // Fisher–Yates over p[0..256]
    for i in (1..256).rev() {
        let j = (rng() % (i as u64 + 1)) as usize;
        p.swap(i, j);
    }
    let mut perm = [0u8; 512];
    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = p[i & 255];
    }
    perm
}
