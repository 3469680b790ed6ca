//! End-to-end tile generation.
//!
//! Stages run in a fixed order, each consuming the full output of the one
//! before it:
//! 1. Flat plane topology
//! 2. Octave heightmap
//! 3. Vertex displacement and normal recomputation
//! 4. Vertex colors
//!
//! Nothing is cached between calls; every run rebuilds the heightmap and
//! mesh from the config alone.

use tracing::{debug, info, info_span};

use crate::coloring::apply_colors;
use crate::config::TerrainConfig;
use crate::deform::apply_height_map;
use crate::error::Result;
use crate::heightmap::{generate_heightmap, HeightMap};
use crate::mesh::MeshData;
use crate::noise_sampler::{NoiseSampler, PerlinSampler};

/// A generated tile: the finished mesh plus the data it was built from.
#[derive(Clone, Debug)]
pub struct TerrainTile {
    pub mesh: MeshData,
    pub heightmap: HeightMap,
    /// The config after clamping, as actually used
    pub config: TerrainConfig,
}

impl TerrainTile {
    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    /// Describe a water plane covering this tile at an externally chosen
    /// sea level.
    pub fn water_plane(&self, sea_level: f32) -> WaterPlane {
        WaterPlane {
            sea_level,
            size: self.grid_size(),
        }
    }
}

/// Placement data handed to a host water feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterPlane {
    pub sea_level: f32,
    /// Edge length in grid units, matching the terrain tile
    pub size: usize,
}

/// Runs the generation stages in order.
pub struct TerrainPipeline;

impl TerrainPipeline {
    /// Generate a tile mesh using Perlin noise seeded from `config.seed`.
    pub fn generate(config: &TerrainConfig) -> Result<MeshData> {
        Ok(Self::generate_tile(config)?.mesh)
    }

    pub fn generate_tile(config: &TerrainConfig) -> Result<TerrainTile> {
        let sampler = PerlinSampler::new(config.seed);
        Self::generate_tile_with(config, &sampler)
    }

    /// Generate a tile with a caller-supplied noise source.
    ///
    /// The config is re-clamped on entry since it may have been edited live.
    pub fn generate_tile_with<S: NoiseSampler>(
        config: &TerrainConfig,
        sampler: &S,
    ) -> Result<TerrainTile> {
        let config = config.clamped()?;
        let _span = info_span!(
            "generate_tile",
            grid_size = config.grid_size,
            octaves = config.octave_count
        )
        .entered();

        let mut mesh = MeshData::plane(config.grid_size);
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built plane"
        );

        let heightmap = generate_heightmap(&config, sampler);
        let (min_h, max_h) = heightmap.min_max();
        debug!(min_h, max_h, "generated heightmap");

        apply_height_map(&mut mesh, &heightmap, &config)?;
        apply_colors(&mut mesh, &heightmap, &config.color_gradient)?;

        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "terrain tile generated"
        );

        Ok(TerrainTile { mesh, heightmap, config })
    }
}
