//! Per-vertex coloring by elevation.

use tracing::debug;

use crate::deform::ensure_matching_dimensions;
use crate::error::Result;
use crate::gradient::ColorGradient;
use crate::heightmap::HeightMap;
use crate::mesh::MeshData;

/// Set `colors[i]` to the gradient sampled at the raw height of vertex `i`.
pub fn apply_colors(
    mesh: &mut MeshData,
    heightmap: &HeightMap,
    gradient: &ColorGradient,
) -> Result<()> {
    ensure_matching_dimensions(mesh, heightmap)?;

    mesh.colors = heightmap
        .as_slice()
        .iter()
        .map(|&h| gradient.evaluate(h))
        .collect();

    debug!(
        colors = mesh.colors.len(),
        stops = gradient.stops().len(),
        "applied vertex colors"
    );
    Ok(())
}
