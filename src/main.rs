use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use topomap::job::preset_names;
use topomap::util::bounds_feature;
use topomap::{DegreeModel, GeoPoint, MapJob, RemoteDataset, Script};

#[derive(Parser)]
#[command(name = "topomap")]
#[command(about = "Relief map regions and contour figure scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the map region around a point
    Region {
        /// Latitude of the center in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the center in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Distance from the center to each edge in kilometers
        #[arg(long, default_value_t = 10.0)]
        radius_km: f64,

        #[arg(long, value_enum, default_value_t = Model::Spherical)]
        model: Model,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the GMT script drawing every figure of a job
    Plan {
        /// Name of a built-in job
        preset: Option<String>,

        /// JSON job file
        #[arg(long, conflicts_with = "preset")]
        job: Option<PathBuf>,
    },
    /// List the built-in jobs
    Presets,
}

#[derive(Copy, Clone, ValueEnum)]
enum Model {
    Spherical,
    Ellipsoidal,
}

impl From<Model> for DegreeModel {
    fn from(m: Model) -> DegreeModel {
        match m {
            Model::Spherical => DegreeModel::Spherical,
            Model::Ellipsoidal => DegreeModel::Ellipsoidal,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Text,
    Json,
    Geojson,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Region {
            lat,
            lon,
            radius_km,
            model,
            format,
        } => region(lat, lon, radius_km, model.into(), format),
        Commands::Plan { preset, job } => plan(preset, job),
        Commands::Presets => {
            for name in preset_names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn region(lat: f64, lon: f64, radius_km: f64, model: DegreeModel, format: Format) -> Result<()> {
    let center = GeoPoint::new(lat, lon).context("invalid center point")?;
    let bounds = topomap::compute_with(center, radius_km, model)
        .with_context(|| format!("cannot span {} km around {}, {}", radius_km, lat, lon))?;
    match format {
        Format::Text => println!("{}", bounds),
        Format::Json => println!("{}", serde_json::to_string_pretty(&bounds)?),
        Format::Geojson => {
            let feature = bounds_feature(&bounds, None);
            println!("{}", serde_json::to_string_pretty(&feature)?);
        }
    }
    Ok(())
}

fn plan(preset: Option<String>, path: Option<PathBuf>) -> Result<()> {
    let job = match (preset, path) {
        (Some(name), None) => MapJob::preset(&name)?,
        (None, Some(path)) => {
            MapJob::from_path(&path)
                .with_context(|| format!("failed to load job {}", path.display()))?
        }
        _ => bail!("give either a preset name or --job <file>"),
    };
    let figures = topomap::run(&job, &RemoteDataset::default(), |i| {
            Script::new(&format!("{}-{}", job.name, i + 1))
        })
        .with_context(|| format!("failed to plan {}", job.name))?;
    for (i, fig) in figures.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", fig.render());
    }
    Ok(())
}
