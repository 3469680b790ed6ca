//! Terrain generation parameters.
//!
//! A [`TerrainConfig`] is immutable for the duration of one generation run.
//! It can be built in code through [`TerrainConfig::builder`] or loaded from
//! JSON; missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::HeightCurve;
use crate::error::{Result, TerrainError};
use crate::gradient::ColorGradient;

pub const MIN_GRID_SIZE: usize = 3;
/// Largest tile; keeps every vertex index well inside `u32`.
pub const MAX_GRID_SIZE: usize = 4096;
pub const MIN_OCTAVE_COUNT: u32 = 1;
/// Octave 16 already weighs `0.5^15` of the first; beyond it the doubled
/// sampling coordinates overflow what Perlin noise accepts.
pub const MAX_OCTAVE_COUNT: u32 = 16;
pub const MIN_HEIGHT_SCALE: f32 = 1.0;
pub const MIN_FREQUENCY: f32 = 0.001;

/// Parameters for one terrain tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Quads per tile edge; the tile has `grid_size + 1` vertices per edge
    pub grid_size: usize,
    /// Number of noise layers summed into the heightmap
    pub octave_count: u32,
    /// Heightmap samples are multiplied by this to get vertex height
    pub height_scale: f32,
    /// Noise sampling frequency across the whole tile
    pub frequency: f32,
    /// Translation in noise space
    pub offset: [f32; 2],
    /// Perlin permutation seed
    pub seed: u32,
    /// Response curve evaluated on the raw height sample
    pub height_curve: HeightCurve,
    /// Ramp evaluated on the raw height sample for vertex colors
    pub color_gradient: ColorGradient,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            octave_count: 1,
            height_scale: 10.0,
            frequency: 1.0,
            offset: [0.0, 0.0],
            seed: 0,
            height_curve: HeightCurve::default(),
            color_gradient: ColorGradient::default(),
        }
    }
}

impl TerrainConfig {
    pub fn builder() -> TerrainConfigBuilder {
        TerrainConfigBuilder::new()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A copy with every numeric field clamped into its allowed range.
    ///
    /// Fails only for values no clamp can repair (NaN or infinite).
    pub fn clamped(&self) -> Result<Self> {
        self.check_finite()?;
        let mut config = self.clone();
        config.grid_size = config.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        config.octave_count = config.octave_count.clamp(MIN_OCTAVE_COUNT, MAX_OCTAVE_COUNT);
        config.height_scale = config.height_scale.max(MIN_HEIGHT_SCALE);
        config.frequency = config.frequency.max(MIN_FREQUENCY);
        Ok(config)
    }

    /// Reject a config with any field out of range instead of clamping.
    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;
        if self.grid_size < MIN_GRID_SIZE {
            return Err(TerrainError::InvalidConfiguration(format!(
                "grid_size {} is below the minimum of {}",
                self.grid_size, MIN_GRID_SIZE
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(TerrainError::InvalidConfiguration(format!(
                "grid_size {} is above the maximum of {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        if self.octave_count < MIN_OCTAVE_COUNT {
            return Err(TerrainError::InvalidConfiguration(format!(
                "octave_count {} is below the minimum of {}",
                self.octave_count, MIN_OCTAVE_COUNT
            )));
        }
        if self.octave_count > MAX_OCTAVE_COUNT {
            return Err(TerrainError::InvalidConfiguration(format!(
                "octave_count {} is above the maximum of {}",
                self.octave_count, MAX_OCTAVE_COUNT
            )));
        }
        if self.height_scale < MIN_HEIGHT_SCALE {
            return Err(TerrainError::InvalidConfiguration(format!(
                "height_scale {} is below the minimum of {}",
                self.height_scale, MIN_HEIGHT_SCALE
            )));
        }
        if self.frequency < MIN_FREQUENCY {
            return Err(TerrainError::InvalidConfiguration(format!(
                "frequency {} is below the minimum of {}",
                self.frequency, MIN_FREQUENCY
            )));
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<()> {
        let fields = [
            ("height_scale", self.height_scale),
            ("frequency", self.frequency),
            ("offset.x", self.offset[0]),
            ("offset.y", self.offset[1]),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(TerrainError::InvalidConfiguration(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Vertices per tile edge.
    pub fn vertices_per_edge(&self) -> usize {
        self.grid_size + 1
    }
}

/// Builder for overriding individual fields on top of the defaults
pub struct TerrainConfigBuilder {
    config: TerrainConfig,
}

impl TerrainConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TerrainConfig::default(),
        }
    }

    pub fn grid_size(mut self, grid_size: usize) -> Self {
        self.config.grid_size = grid_size;
        self
    }

    pub fn octave_count(mut self, octave_count: u32) -> Self {
        self.config.octave_count = octave_count;
        self
    }

    pub fn height_scale(mut self, height_scale: f32) -> Self {
        self.config.height_scale = height_scale;
        self
    }

    pub fn frequency(mut self, frequency: f32) -> Self {
        self.config.frequency = frequency;
        self
    }

    pub fn offset(mut self, offset: [f32; 2]) -> Self {
        self.config.offset = offset;
        self
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn height_curve(mut self, curve: HeightCurve) -> Self {
        self.config.height_curve = curve;
        self
    }

    pub fn color_gradient(mut self, gradient: ColorGradient) -> Self {
        self.config.color_gradient = gradient;
        self
    }

    pub fn build(self) -> TerrainConfig {
        self.config
    }
}

impl Default for TerrainConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
