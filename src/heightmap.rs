//! Heightmap storage and multi-octave synthesis.

use rayon::prelude::*;

use crate::config::{TerrainConfig, MAX_OCTAVE_COUNT};
use crate::noise_sampler::NoiseSampler;

/// Frequency multiplier applied per octave.
pub const LACUNARITY: f32 = 2.0;

/// Amplitude multiplier applied per octave.
pub const PERSISTENCE: f32 = 0.5;

/// A square grid of height samples, one per mesh vertex.
///
/// Cells are stored row-major with `z` as the row, matching vertex order
/// in [`crate::mesh::MeshData`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    size: usize,
    data: Vec<f32>,
}

impl HeightMap {
    /// A map of `size × size` zeroed samples.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Samples per edge (`grid_size + 1`).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.size && z < self.size);
        z * self.size + x
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[self.index(x, z)]
    }

    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    /// Samples in vertex order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &val)| (idx % size, idx / size, val))
    }

    /// Lowest and highest sample.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min_h = f32::MAX;
        let mut max_h = f32::MIN;
        for &h in &self.data {
            if h < min_h {
                min_h = h;
            }
            if h > max_h {
                max_h = h;
            }
        }
        (min_h, max_h)
    }
}

/// Rescale `sample` from `[min, max]` to `[0, 1]`.
///
/// A degenerate range maps everything to 0.
pub fn normalize_sample(min: f32, max: f32, sample: f32) -> f32 {
    let range = max - min;
    if range.abs() <= f32::EPSILON {
        0.0
    } else {
        (sample - min) / range
    }
}

/// Generate the heightmap for `config` by summing octaves of `sampler`.
///
/// Octave `n` samples at `(coord / (grid_size + 1) * frequency + offset) *
/// LACUNARITY^n` with weight `PERSISTENCE^n`. Results are raw weighted sums
/// and are not normalized. At most [`MAX_OCTAVE_COUNT`] octaves are summed;
/// past that the sampling coordinates leave the range Perlin noise accepts.
pub fn generate_heightmap<S: NoiseSampler>(config: &TerrainConfig, sampler: &S) -> HeightMap {
    let size = config.grid_size + 1;
    let octave_count = config.octave_count.min(MAX_OCTAVE_COUNT);
    let sample_count = size as f32;
    let mut heightmap = HeightMap::new(size);

    heightmap
        .data
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(z, row)| {
            let base_v = z as f32 / sample_count * config.frequency + config.offset[1];
            for (x, cell) in row.iter_mut().enumerate() {
                let base_u = x as f32 / sample_count * config.frequency + config.offset[0];

                let mut weight = 1.0f32;
                let mut octave_scale = 1.0f32;
                for _ in 0..octave_count {
                    *cell += weight * sampler.sample(base_u * octave_scale, base_v * octave_scale);
                    weight *= PERSISTENCE;
                    octave_scale *= LACUNARITY;
                }
            }
        });

    heightmap
}
