// Map pixel index `i` of a `size`-wide grid linearly onto [−1, 1].
// Built from an integer numerator so mirrored pixels get exactly
// mirrored coordinates. A single pixel sits at the centre.
#[inline]
pub fn grid_coord(i: usize, size: usize) -> f64 {
    if size <= 1 {
        return 0.0;
    }
    let span = (size - 1) as f64;
    (2.0 * i as f64 - span) / span
}

// Cubic Hermite curve t²(3 − 2t); zero slope at both ends
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

// Round to the nearest multiple of `step`
#[inline]
pub fn quantize(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
