use serde::{Deserialize, Serialize};

// size×size elevation grid, row-major, indexed as (row, col) = (y, x).
// Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHeightmap")]
pub struct Heightmap {
    size: usize,
    data: Vec<f64>,
}

// Wire shape, checked before it becomes a Heightmap
#[derive(Deserialize)]
struct RawHeightmap {
    size: usize,
    data: Vec<f64>,
}

impl TryFrom<RawHeightmap> for Heightmap {
    type Error = String;

    fn try_from(raw: RawHeightmap) -> Result<Self, Self::Error> {
        let expected = raw.size.checked_mul(raw.size);
        if expected != Some(raw.data.len()) {
            return Err(format!(
                "heightmap of size {} needs {}×{} values, got {}",
                raw.size,
                raw.size,
                raw.size,
                raw.data.len()
            ));
        }
        Ok(Self {
            size: raw.size,
            data: raw.data,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Heightmap {
    pub(crate) fn from_vec(size: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.size..(y + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics; an empty grid yields no rows anyway
        self.data.chunks(self.size.max(1))
    }

    // Flat row-major view
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn stats(&self) -> HeightmapStats {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = if self.data.is_empty() {
            0.0
        } else {
            sum / self.data.len() as f64
        };
        HeightmapStats { min, max, mean }
    }

    // True when both grids hold the same bits everywhere
    pub fn bit_eq(&self, other: &Heightmap) -> bool {
        self.size == other.size
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}
