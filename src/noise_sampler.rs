//! Coherent 2D noise source used by heightmap synthesis.

use noise::{NoiseFn, Perlin};

/// A deterministic, continuous 2D noise function.
///
/// Implementations return values nominally in `[0, 1]` and must give the
/// same output for the same input every time. `Sync` is required because
/// heightmap rows are sampled in parallel.
pub trait NoiseSampler: Sync {
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinSampler {
    perlin: Perlin,
}

impl PerlinSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinSampler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseSampler for PerlinSampler {
    fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.get([x as f64, y as f64]);
        (0.5 * (raw + 1.0)).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_is_deterministic() {
        let a = PerlinSampler::new(7);
        let b = PerlinSampler::new(7);
        for i in 0..50 {
            let x = i as f32 * 0.37;
            let y = i as f32 * 0.11 + 3.0;
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_perlin_range() {
        let sampler = PerlinSampler::default();
        for i in 0..200 {
            let v = sampler.sample(i as f32 * 0.173, i as f32 * 0.291);
            assert!((0.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_perlin_continuous_across_lattice() {
        // Samples just either side of an integer boundary stay close
        let sampler = PerlinSampler::new(3);
        for i in 1..10 {
            let x = i as f32;
            let left = sampler.sample(x - 0.001, 0.5);
            let right = sampler.sample(x + 0.001, 0.5);
            assert!((left - right).abs() < 0.01);
        }
    }
}
