use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bbox::{self, DegreeModel};
use crate::error::{Error, Result};
use crate::figure::{ContourOptions, Figure, ImageOptions, TextOptions};
use crate::relief::{ReliefRequest, ReliefSource, Resolution};
use crate::types::{Bounds, GeoPoint};

/// One drawing call on a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Contour(ContourOptions),
    Image(ImageOptions),
    Text(TextOptions),
}

/// Layers drawn in order onto one figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FigureSpec {
    pub layers: Vec<Layer>,
}

/// Everything needed to draw the relief maps around one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapJob {
    pub name: String,
    pub center: GeoPoint,
    /// Distance from the center to each edge of the map.
    pub radius_km: f64,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub model: DegreeModel,
    pub figures: Vec<FigureSpec>,
}

const PRESETS: [&str; 2] = ["sonthofen", "nuernberg"];

/// Names accepted by `MapJob::preset`.
pub fn preset_names() -> &'static [&'static str] {
    &PRESETS
}

fn contour(interval: f64, annotation: Option<f64>, projection: Option<&str>) -> ContourOptions {
    ContourOptions {
        annotation,
        projection: projection.map(str::to_string),
        ..ContourOptions::new(interval)
    }
}

impl MapJob {
    /// Built-in job by name, see `preset_names`.
    pub fn preset(name: &str) -> Result<MapJob> {
        match name {
            "sonthofen" => MapJob::sonthofen(),
            "nuernberg" => MapJob::nuernberg(),
            _ => Err(Error::UnknownPreset(name.to_string())),
        }
    }

    fn sonthofen() -> Result<MapJob> {
        Ok(MapJob {
            name: "sonthofen".to_string(),
            center: GeoPoint::new(47.51, 10.28)?,
            radius_km: 10.0,
            resolution: Resolution::OneSecond,
            model: DegreeModel::Spherical,
            figures: vec![FigureSpec {
                              layers: vec![Layer::Contour(contour(50.0, None, Some("M10c")))],
                          }],
        })
    }

    fn nuernberg() -> Result<MapJob> {
        let label = TextOptions {
            text: "Nürnberg".to_string(),
            position: None,
            font: Some("8p,Helvetica-Bold,black".to_string()),
            justify: Some("CM".to_string()),
        };
        let labelled = contour(20.0, Some(250.0), Some("M10c"));
        let plain = contour(20.0, Some(250.0), None);
        let framed = ContourOptions {
            frame: true,
            ..contour(20.0, Some(250.0), Some("M10c"))
        };
        let relief = ImageOptions {
            cmap: "haxby".to_string(),
            projection: Some("M10c".to_string()),
            frame: true,
        };
        let deep = ContourOptions {
            limit: Some((-4000.0, -2000.0)),
            ..contour(250.0, Some(1000.0), None)
        };
        Ok(MapJob {
            name: "nuernberg".to_string(),
            center: GeoPoint::new(49.45, 11.07)?,
            radius_km: 25.0,
            resolution: Resolution::OneSecond,
            model: DegreeModel::Spherical,
            figures: vec![FigureSpec { layers: vec![Layer::Contour(labelled), Layer::Text(label)] },
                          FigureSpec { layers: vec![Layer::Contour(plain)] },
                          FigureSpec { layers: vec![Layer::Contour(framed)] },
                          FigureSpec { layers: vec![Layer::Image(relief), Layer::Contour(deep)] }],
        })
    }

    /// Read a job from JSON.
    pub fn from_json<R: Read>(reader: R) -> Result<MapJob> {
        let job: MapJob = ::serde_json::from_reader(reader)?;
        job.validate()?;
        Ok(job)
    }

    /// Read a job from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MapJob> {
        let f = File::open(path)?;
        MapJob::from_json(BufReader::new(f))
    }

    /// Check the radius and every layer. An image drawn over contours only produces a warning.
    pub fn validate(&self) -> Result<()> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(Error::InvalidRadius(self.radius_km));
        }
        for (i, fig) in self.figures.iter().enumerate() {
            if fig.layers.is_empty() {
                return Err(Error::InvalidJob(format!("figure {} of {} has no layers",
                                                     i + 1,
                                                     self.name)));
            }
            let mut contoured = false;
            for layer in &fig.layers {
                match *layer {
                    Layer::Contour(ref c) => {
                        c.validate()?;
                        contoured = true;
                    }
                    Layer::Image(ref img) => {
                        img.validate()?;
                        if contoured {
                            warn!(job = %self.name,
                                  figure = i + 1,
                                  "image layer drawn after contours will hide them");
                        }
                    }
                    Layer::Text(_) => (),
                }
            }
        }
        Ok(())
    }

    /// The map region around the center.
    pub fn region(&self) -> Result<Bounds> {
        bbox::compute_with(self.center, self.radius_km, self.model)
    }

    pub fn request(&self) -> Result<ReliefRequest> {
        Ok(ReliefRequest::new(self.resolution, self.region()?))
    }
}

/// Load the job's grid once from `source` and draw every figure on a fresh surface from
/// `new_figure`, which receives the figure's zero-based index. Each figure is shown after its
/// last layer. Returns the figures in job order.
pub fn run<S, F, N>(job: &MapJob, source: &S, mut new_figure: N) -> Result<Vec<F>>
    where S: ReliefSource,
          F: Figure<Grid = S::Grid>,
          N: FnMut(usize) -> F
{
    job.validate()?;
    let request = job.request()?;
    info!(job = %job.name,
          region = %request.region,
          resolution = %request.resolution,
          figures = job.figures.len(),
          "planning relief maps");
    let grid = source.load(&request)?;
    let mut out = Vec::with_capacity(job.figures.len());
    for (i, spec) in job.figures.iter().enumerate() {
        let mut fig = new_figure(i);
        for layer in &spec.layers {
            match *layer {
                Layer::Contour(ref c) => fig.contour(&grid, c)?,
                Layer::Image(ref img) => fig.image(&grid, img)?,
                Layer::Text(ref t) => fig.text(t.position.unwrap_or(job.center), t)?,
            }
        }
        fig.show()?;
        out.push(fig);
    }
    Ok(out)
}
