//! Writing generated tiles to disk for inspection or hand-off.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use tracing::info;

use crate::error::Result;
use crate::heightmap::{normalize_sample, HeightMap};
use crate::mesh::MeshData;

/// Export the mesh as Wavefront OBJ with per-vertex colors.
///
/// Faces reference the same index for position, UV and normal.
pub fn export_obj(mesh: &MeshData, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut out)?;
    out.flush()?;
    info!(path = %path.display(), vertices = mesh.vertex_count(), "wrote OBJ");
    Ok(())
}

/// OBJ serialization, split out so it can target any writer.
pub fn write_obj<W: Write>(mesh: &MeshData, out: &mut W) -> Result<()> {
    writeln!(out, "# terrain tile, grid size {}", mesh.grid_size)?;
    writeln!(out, "o terrain")?;
    for (v, c) in mesh.vertices.iter().zip(&mesh.colors) {
        writeln!(out, "v {} {} {} {} {} {}", v[0], v[1], v[2], c.r, c.g, c.b)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv[0], uv[1])?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    for tri in mesh.triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Export the heightmap as grayscale, stretched to its own min/max.
pub fn export_heightmap_png(heightmap: &HeightMap, path: impl AsRef<Path>) -> Result<()> {
    let size = heightmap.size() as u32;
    let (min_h, max_h) = heightmap.min_max();
    let mut img: GrayImage = ImageBuffer::new(size, size);

    for (x, z, h) in heightmap.iter() {
        let t = normalize_sample(min_h, max_h, h).clamp(0.0, 1.0);
        img.put_pixel(x as u32, z as u32, Luma([(t * 255.0).round() as u8]));
    }

    img.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), min_h, max_h, "wrote heightmap preview");
    Ok(())
}

/// Export vertex colors as a top-down image, one pixel per vertex.
pub fn export_color_png(mesh: &MeshData, path: impl AsRef<Path>) -> Result<()> {
    let size = (mesh.grid_size + 1) as u32;
    let mut img: RgbImage = ImageBuffer::new(size, size);

    for (i, color) in mesh.colors.iter().enumerate() {
        let (x, z) = mesh.grid_coord(i);
        img.put_pixel(x as u32, z as u32, Rgb(color.to_rgb8()));
    }

    img.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), "wrote color preview");
    Ok(())
}

/// Write the interleaved vertex buffer followed by the `u32` index buffer.
pub fn export_raw_vertices(mesh: &MeshData, path: impl AsRef<Path>) -> Result<()> {
    let packed = mesh.packed_vertices();
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    out.write_all(bytemuck::cast_slice(&packed))?;
    out.write_all(bytemuck::cast_slice(&mesh.triangles))?;
    out.flush()?;
    info!(
        path = %path.as_ref().display(),
        vertex_bytes = packed.len() * std::mem::size_of::<crate::mesh::PackedVertex>(),
        index_bytes = mesh.triangles.len() * 4,
        "wrote raw buffers"
    );
    Ok(())
}
