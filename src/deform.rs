//! Vertex displacement from a heightmap.

use tracing::debug;

use crate::config::TerrainConfig;
use crate::error::{Result, TerrainError};
use crate::heightmap::HeightMap;
use crate::mesh::MeshData;

/// Fail if `heightmap` does not have exactly one sample per vertex of `mesh`.
pub(crate) fn ensure_matching_dimensions(mesh: &MeshData, heightmap: &HeightMap) -> Result<()> {
    let expected = mesh.vertex_count();
    if heightmap.len() != expected || heightmap.size() != mesh.grid_size + 1 {
        return Err(TerrainError::DimensionMismatch {
            expected,
            actual: heightmap.len(),
        });
    }
    Ok(())
}

/// Lift every vertex to `height_scale * h * height_curve(h)` and recompute
/// normals from the displaced surface.
///
/// `h` is the raw heightmap sample; the curve receives it unmodified.
pub fn apply_height_map(
    mesh: &mut MeshData,
    heightmap: &HeightMap,
    config: &TerrainConfig,
) -> Result<()> {
    ensure_matching_dimensions(mesh, heightmap)?;

    for (vertex, &h) in mesh.vertices.iter_mut().zip(heightmap.as_slice()) {
        vertex[1] = config.height_scale * h * config.height_curve.evaluate(h);
    }

    mesh.recalculate_normals();

    debug!(vertices = mesh.vertex_count(), "applied heightmap");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveKey, HeightCurve};

    fn ramp_heightmap(size: usize) -> HeightMap {
        let mut hm = HeightMap::new(size);
        for z in 0..size {
            for x in 0..size {
                hm.set(x, z, (x + 2 * z) as f32 * 0.1);
            }
        }
        hm
    }

    #[test]
    fn test_vertex_height_formula() {
        let curve = HeightCurve::new(vec![
            CurveKey::new(0.0, 0.2),
            CurveKey::new(0.5, 1.5),
            CurveKey::new(1.2, 0.7),
        ])
        .unwrap();
        let config = TerrainConfig::builder()
            .grid_size(4)
            .height_scale(3.0)
            .height_curve(curve.clone())
            .build();
        let hm = ramp_heightmap(5);
        let mut mesh = MeshData::plane(4);
        apply_height_map(&mut mesh, &hm, &config).unwrap();

        for i in 0..mesh.vertex_count() {
            let (x, z) = mesh.grid_coord(i);
            let h = hm.get(x, z);
            assert_eq!(mesh.vertices[i][1], 3.0 * h * curve.evaluate(h));
            assert_eq!(mesh.vertices[i][0], x as f32);
            assert_eq!(mesh.vertices[i][2], z as f32);
        }
    }

    #[test]
    fn test_curve_sees_raw_sample() {
        // Samples above 1 hit the clamped tail of the linear curve
        let config = TerrainConfig::builder()
            .grid_size(3)
            .height_scale(1.0)
            .height_curve(HeightCurve::linear())
            .build();
        let mut hm = HeightMap::new(4);
        hm.set(1, 1, 1.5);
        hm.set(2, 2, 0.5);
        let mut mesh = MeshData::plane(3);
        apply_height_map(&mut mesh, &hm, &config).unwrap();
        assert_eq!(mesh.vertices[5][1], 1.5);
        assert_eq!(mesh.vertices[10][1], 0.25);
    }

    #[test]
    fn test_normals_recomputed_after_displacement() {
        let config = TerrainConfig::builder()
            .grid_size(4)
            .height_curve(HeightCurve::constant(1.0))
            .build();
        let mut mesh = MeshData::plane(4);
        apply_height_map(&mut mesh, &ramp_heightmap(5), &config).unwrap();
        // Height rises with x and z, so interior normals lean toward -X and -Z
        let n = mesh.normals[6];
        assert!(n[0] < 0.0 && n[2] < 0.0 && n[1] > 0.0);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let config = TerrainConfig::builder().grid_size(4).build();
        let mut mesh = MeshData::plane(4);
        let result = apply_height_map(&mut mesh, &HeightMap::new(4), &config);
        assert!(matches!(
            result,
            Err(TerrainError::DimensionMismatch { expected: 25, actual: 16 })
        ));
        // Mesh untouched on failure
        assert!(mesh.vertices.iter().all(|v| v[1] == 0.0));
    }
}
