//! Load a phantom description, build its geometry and report on it
//!
//! ```text
//! phantom_info demos/data/phantom_save.json --budget --obj phantom.obj
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use phantomas_core::{ColorStrategy, Drawable, HashedPalette, PaletteCycle, SeededPalette, Vector3f};
use phantomas_geometry::{round_to_precision, FiberSource, PhantomScene, DEFAULT_PRECISION};
use phantomas_io::{read_config, read_phantom, ObjWriter, SceneConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// How representations are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    /// Cycle through the palette in creation order
    Cycle,
    /// Pick a palette entry from a hash of the seed and creation index
    Hashed,
    /// Draw palette entries from a seeded random generator
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "phantom_info")]
#[command(about = "Build fiber phantom geometry and print mesh statistics")]
#[command(version)]
struct Args {
    /// Phantom description (JSON)
    phantom: PathBuf,

    /// Scene configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for hashed or random palette colors; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Color assignment; defaults to `random` when a seed is known, else `cycle`
    #[arg(long, value_enum)]
    colors: Option<ColorMode>,

    /// Share default segment budgets across the phantom
    #[arg(long)]
    budget: bool,

    /// Translate every fiber along x, then refresh the scene
    #[arg(long)]
    shift: Option<f32>,

    /// Export the built scene as Wavefront OBJ
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,phantomas_geometry=trace`
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log filter '{}'", args.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => read_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if args.budget && config.constraints.is_none() {
        config.constraints = Some(Default::default());
    }

    let mut loaded = read_phantom(&args.phantom)
        .with_context(|| format!("loading {}", args.phantom.display()))?;
    let phantom = &loaded.phantom;

    let seed = args.seed.or(config.color_seed);
    let mode = args.colors.unwrap_or(match seed {
        Some(_) => ColorMode::Random,
        None => ColorMode::Cycle,
    });
    let mut colors: Box<dyn ColorStrategy> = match mode {
        ColorMode::Cycle => Box::new(PaletteCycle::default()),
        ColorMode::Hashed => Box::new(HashedPalette::new(seed.unwrap_or_default())),
        ColorMode::Random => Box::new(SeededPalette::new(seed.unwrap_or_default())),
    };

    let discretization = config.resolve(phantom.fibers.len(), phantom.regions.len());
    let mut scene = PhantomScene::build(phantom, &discretization, colors.as_mut())?;

    println!("Phantom: {}", args.phantom.display());
    println!(
        "Radius {} / viewing distance {}",
        round(phantom.radius()),
        round(phantom.viewing_distance())
    );

    println!("\nFibers:");
    for (i, name) in loaded.fiber_names.iter().enumerate() {
        let (fiber, skeleton, tube) = (&phantom.fibers[i], &scene.skeletons[i], &scene.tubes[i]);
        println!(
            "  {:<20} length {:>7}  radius {:>5}  path segments {:>4}  tube {} vertices / {} faces  color #{:06x}",
            name,
            round(fiber.length()),
            round(tube.radius()),
            skeleton.segments(),
            tube.mesh.geometry.vertex_count(),
            tube.mesh.geometry.face_count(),
            tube.color().to_hex(),
        );
    }

    println!("\nIsotropic regions:");
    for (i, name) in loaded.region_names.iter().enumerate() {
        let (region, sphere) = (&phantom.regions[i], &scene.regions[i]);
        println!(
            "  {:<20} center ({}, {}, {})  radius {:>5}  {} vertices  color #{:06x}",
            name,
            round(region.center.x),
            round(region.center.y),
            round(region.center.z),
            round(region.radius),
            sphere.mesh.geometry.vertex_count(),
            sphere.color().to_hex(),
        );
    }

    println!(
        "\nTotal: {} vertices, {} faces",
        scene.total_vertices(),
        scene.total_faces()
    );
    let (min, max) = scene.bounding_box();
    let center = scene.center();
    println!(
        "Scene bounds ({}, {}, {}) to ({}, {}, {}), centered at ({}, {}, {})",
        round(min.x), round(min.y), round(min.z),
        round(max.x), round(max.y), round(max.z),
        round(center.x), round(center.y), round(center.z),
    );

    if let Some(dx) = args.shift {
        for fiber in &mut loaded.phantom.fibers {
            fiber.translate(Vector3f::new(dx, 0.0, 0.0));
        }
        scene.refresh(&loaded.phantom)?;
        info!(dx, "fibers shifted and scene refreshed");
        println!("Shifted fibers by {} along x; tube revisions now {:?}", dx,
            scene.tubes.iter().map(|t| t.mesh.revision).collect::<Vec<_>>());
    }

    if let Some(path) = &args.obj {
        ObjWriter::write_scene(&scene, path).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn round(value: f32) -> f64 {
    round_to_precision(value as f64, DEFAULT_PRECISION)
}
