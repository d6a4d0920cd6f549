use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use seabed::{BathymetryGenerator, Region, TerrainConfig, render};

#[derive(Parser, Debug)]
#[command(name = "seabed")]
#[command(about = "Survey the procedural seabed and write diagnostic PNGs")]
struct Args {
    /// JSON terrain config; omitted fields keep the built-in world
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = -50_000.0, allow_hyphen_values = true)]
    x_min: f64,

    #[arg(long, default_value_t = 50_000.0, allow_hyphen_values = true)]
    x_max: f64,

    #[arg(long, default_value_t = -30_000.0, allow_hyphen_values = true)]
    z_min: f64,

    #[arg(long, default_value_t = 30_000.0, allow_hyphen_values = true)]
    z_max: f64,

    /// Raster width in pixels
    #[arg(short = 'W', long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Raster height in pixels
    #[arg(short = 'H', long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Output directory
    #[arg(short, long, default_value = "artifacts")]
    out: PathBuf,

    /// Print the per-layer breakdown at x,z instead of surveying
    #[arg(long, value_delimiter = ',', num_args = 2, allow_hyphen_values = true)]
    probe: Option<Vec<f64>>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> seabed::Result<()> {
    let config = match &args.config {
        Some(path) => TerrainConfig::load(path)?,
        None => TerrainConfig::default(),
    };
    let generator = BathymetryGenerator::new(config)?;

    if let Some(point) = &args.probe {
        let b = generator.breakdown(point[0], point[1]);
        println!("{}", serde_json::to_string_pretty(&b)?);
        return Ok(());
    }

    let region = Region::new(args.x_min, args.x_max, args.z_min, args.z_max);
    let (w, h) = (args.width as usize, args.height as usize);
    std::fs::create_dir_all(&args.out)?;

    tracing::info!(w, h, ?region, "surveying seabed");
    let (survey, timings) = seabed::survey(&generator, region, w, h);

    for t in &timings {
        tracing::info!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8]| -> seabed::Result<()> {
        let path = args.out.join(name);
        image::save_buffer(&path, rgba, w as u32, h as u32, image::ColorType::Rgba8)?;
        tracing::info!("saved {}", path.display());
        Ok(())
    };

    save("bathymetry.png", &survey.rgba)?;
    save("heightmap.png", &render::render_heightmap(&survey.height))?;
    save("provinces.png", &render::render_provinces(&survey.province))?;

    let path = args.out.join("depth_brightness.png");
    survey.depth_brightness().save(&path)?;
    tracing::info!("saved {}", path.display());

    let (lo, hi) = survey.height.min_max();
    tracing::info!(deepest = lo, shallowest = hi, "done");
    Ok(())
}
