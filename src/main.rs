use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrain_tile::{export, TerrainConfig, TerrainPipeline};

#[derive(Parser, Debug)]
#[command(name = "terrain_tile")]
#[command(about = "Generate a procedural terrain tile mesh")]
struct Args {
    /// JSON config file (fields not given fall back to defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quads per tile edge (minimum 3)
    #[arg(short, long)]
    grid_size: Option<usize>,

    /// Number of noise octaves (minimum 1)
    #[arg(short, long)]
    octaves: Option<u32>,

    /// Vertical scale applied to height samples (minimum 1)
    #[arg(long)]
    height_scale: Option<f32>,

    /// Noise sampling frequency (minimum 0.001)
    #[arg(short, long)]
    frequency: Option<f32>,

    /// Noise-space X offset
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<f32>,

    /// Noise-space Z offset
    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<f32>,

    /// Noise seed (random if neither this nor a config file is given)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Write the mesh as Wavefront OBJ
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Write a grayscale heightmap preview PNG
    #[arg(long)]
    heightmap_png: Option<PathBuf>,

    /// Write a top-down vertex color preview PNG
    #[arg(long)]
    color_png: Option<PathBuf>,

    /// Write interleaved vertex and index buffers as raw bytes
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Report water plane placement at this sea level
    #[arg(long, allow_hyphen_values = true)]
    sea_level: Option<f32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            TerrainConfig::from_json_file(path)?
        }
        None => TerrainConfig::builder()
            .seed(args.seed.unwrap_or_else(rand::random))
            .build(),
    };

    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(octaves) = args.octaves {
        config.octave_count = octaves;
    }
    if let Some(height_scale) = args.height_scale {
        config.height_scale = height_scale;
    }
    if let Some(frequency) = args.frequency {
        config.frequency = frequency;
    }
    if let Some(x) = args.offset_x {
        config.offset[0] = x;
    }
    if let Some(y) = args.offset_y {
        config.offset[1] = y;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    info!(
        seed = config.seed,
        grid_size = config.grid_size,
        octaves = config.octave_count,
        "generating terrain tile"
    );
    let tile = TerrainPipeline::generate_tile(&config)?;

    let (min_h, max_h) = tile.heightmap.min_max();
    let (min_y, max_y) = tile.mesh.height_range();
    info!("Heightmap range: {:.3} to {:.3}", min_h, max_h);
    info!("Vertex height range: {:.2} to {:.2}", min_y, max_y);

    if let Some(sea_level) = args.sea_level {
        let water = tile.water_plane(sea_level);
        info!(sea_level = water.sea_level, size = water.size, "water plane");
    }

    if let Some(path) = &args.obj {
        export::export_obj(&tile.mesh, path)?;
    }
    if let Some(path) = &args.heightmap_png {
        export::export_heightmap_png(&tile.heightmap, path)?;
    }
    if let Some(path) = &args.color_png {
        export::export_color_png(&tile.mesh, path)?;
    }
    if let Some(path) = &args.raw {
        export::export_raw_vertices(&tile.mesh, path)?;
    }

    Ok(())
}
