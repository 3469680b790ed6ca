//! Flat grid mesh construction and normal recomputation.

use bytemuck::{Pod, Zeroable};

use crate::config::MAX_GRID_SIZE;
use crate::gradient::Color;

/// Tangent shared by every vertex of the plane.
pub const PLANE_TANGENT: [f32; 4] = [1.0, 0.0, 0.0, -1.0];

const UP: [f32; 3] = [0.0, 1.0, 0.0];

// Indices are `u32`; the largest allowed plane must stay addressable.
const _: () = assert!((MAX_GRID_SIZE + 1) * (MAX_GRID_SIZE + 1) <= u32::MAX as usize);

/// Geometry for one terrain tile as parallel per-vertex arrays.
///
/// Vertex `i` sits at grid coordinate `(i % (grid_size + 1), i / (grid_size + 1))`.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub grid_size: usize,
    pub vertices: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub tangents: Vec<[f32; 4]>,
    pub triangles: Vec<u32>,
    pub colors: Vec<Color>,
    pub normals: Vec<[f32; 3]>,
}

/// Interleaved vertex layout for handing the mesh to a GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
    pub color: [f32; 4],
}

impl MeshData {
    /// Build a flat `grid_size × grid_size` quad grid on the XZ plane.
    ///
    /// UVs are raw grid coordinates, not remapped to `[0, 1]`. Colors start
    /// white and normals point straight up until the mesh is deformed.
    ///
    /// `grid_size` must not exceed [`MAX_GRID_SIZE`] or vertex indices would
    /// overflow `u32`. [`TerrainConfig::clamped`](crate::TerrainConfig::clamped)
    /// enforces this for the pipeline.
    pub fn plane(grid_size: usize) -> Self {
        debug_assert!(grid_size <= MAX_GRID_SIZE, "grid size {grid_size} overflows u32 indices");
        let row = grid_size + 1;
        let vertex_count = row * row;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for z in 0..row {
            for x in 0..row {
                vertices.push([x as f32, 0.0, z as f32]);
                uvs.push([x as f32, z as f32]);
            }
        }

        let mut triangles = Vec::with_capacity(grid_size * grid_size * 6);
        for z in 0..grid_size {
            for x in 0..grid_size {
                let v = (z * row + x) as u32;
                let w = row as u32;
                // Both triangles wind so the face normal is +Y
                triangles.extend_from_slice(&[v, v + w, v + 1]);
                triangles.extend_from_slice(&[v + 1, v + w, v + w + 1]);
            }
        }

        Self {
            grid_size,
            vertices,
            uvs,
            tangents: vec![PLANE_TANGENT; vertex_count],
            triangles,
            colors: vec![Color::WHITE; vertex_count],
            normals: vec![UP; vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Grid coordinate `(x, z)` of vertex `i`.
    pub fn grid_coord(&self, i: usize) -> (usize, usize) {
        let row = self.grid_size + 1;
        (i % row, i / row)
    }

    /// Recompute per-vertex normals from the current positions.
    ///
    /// Each face's unnormalized cross product is added to its three corners,
    /// so larger faces weigh more, then every sum is normalized. Vertices
    /// with no usable faces keep +Y.
    pub fn recalculate_normals(&mut self) {
        let mut sums = vec![[0.0f32; 3]; self.vertices.len()];

        for tri in self.triangles.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = self.vertices[ia];
            let b = self.vertices[ib];
            let c = self.vertices[ic];
            let face = cross(sub(b, a), sub(c, a));
            for idx in [ia, ib, ic] {
                sums[idx] = add(sums[idx], face);
            }
        }

        self.normals = sums.into_iter().map(normalize_or_up).collect();
    }

    /// Interleave all attributes into one buffer.
    pub fn packed_vertices(&self) -> Vec<PackedVertex> {
        (0..self.vertices.len())
            .map(|i| PackedVertex {
                position: self.vertices[i],
                normal: self.normals[i],
                uv: self.uvs[i],
                tangent: self.tangents[i],
                color: self.colors[i].to_array(),
            })
            .collect()
    }

    /// Vertex Y range.
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v[1]), hi.max(v[1])))
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize_or_up(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 1e-12 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        UP
    }
}
