//! Procedural terrain tile generation library
//!
//! Builds a flat vertex grid, displaces it with layered noise shaped by a
//! height curve, and colors it by elevation. The finished [`MeshData`] is
//! handed to a host renderer.

pub mod coloring;
pub mod config;
pub mod curve;
pub mod deform;
pub mod error;
pub mod export;
pub mod gradient;
pub mod heightmap;
pub mod mesh;
pub mod noise_sampler;
pub mod pipeline;

pub use config::TerrainConfig;
pub use curve::{CurveKey, HeightCurve};
pub use error::{Result, TerrainError};
pub use gradient::{Color, ColorGradient, GradientMode, GradientStop};
pub use heightmap::HeightMap;
pub use mesh::MeshData;
pub use noise_sampler::{NoiseSampler, PerlinSampler};
pub use pipeline::{TerrainPipeline, TerrainTile, WaterPlane};
