use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::relief::RemoteGrid;
use crate::types::GeoPoint;

/// Contour lines over a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourOptions {
    /// Elevation step between contour lines.
    pub interval: f64,
    /// Step between annotated (labelled, thicker) contour lines.
    #[serde(default)]
    pub annotation: Option<f64>,
    /// Only draw contours between these (low, high) elevations.
    #[serde(default)]
    pub limit: Option<(f64, f64)>,
    #[serde(default)]
    pub projection: Option<String>,
    #[serde(default)]
    pub frame: bool,
}

impl ContourOptions {
    pub fn new(interval: f64) -> ContourOptions {
        ContourOptions {
            interval,
            annotation: None,
            limit: None,
            projection: None,
            frame: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(Error::InvalidJob(format!("contour interval must be positive, got {}",
                                                 self.interval)));
        }
        if let Some(a) = self.annotation {
            if !a.is_finite() || a <= 0.0 {
                return Err(Error::InvalidJob(format!("annotation interval must be positive, \
                                                      got {}",
                                                     a)));
            }
        }
        if let Some((lo, hi)) = self.limit {
            if !(lo < hi) {
                return Err(Error::InvalidJob(format!("contour limit {}/{} is empty", lo, hi)));
            }
        }
        Ok(())
    }
}

/// Color-mapped relief image of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub cmap: String,
    #[serde(default)]
    pub projection: Option<String>,
    #[serde(default)]
    pub frame: bool,
}

impl ImageOptions {
    pub fn validate(&self) -> Result<()> {
        if self.cmap.trim().is_empty() {
            return Err(Error::InvalidJob("image layer needs a color palette".to_string()));
        }
        Ok(())
    }
}

/// A text label placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub text: String,
    /// Where to anchor the label. Defaults to the map center.
    #[serde(default)]
    pub position: Option<GeoPoint>,
    /// Font as `size,name,color`, e.g. `8p,Helvetica-Bold,black`.
    #[serde(default)]
    pub font: Option<String>,
    /// Two-letter anchor code, e.g. `CM` for center middle.
    #[serde(default)]
    pub justify: Option<String>,
}

/// A plotting surface that contours, images and labels relief grids.
pub trait Figure {
    type Grid;

    fn contour(&mut self, grid: &Self::Grid, opts: &ContourOptions) -> Result<()>;
    fn image(&mut self, grid: &Self::Grid, opts: &ImageOptions) -> Result<()>;
    fn text(&mut self, at: GeoPoint, opts: &TextOptions) -> Result<()>;
    fn show(&mut self) -> Result<()>;
}

/// A figure that writes out the GMT modern mode commands drawing it.
#[derive(Debug, Clone)]
pub struct Script {
    lines: Vec<String>,
    shown: bool,
}

/// Quote a word for `sh` unless it is made only of characters the shell leaves alone.
fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty() &&
                s.chars().all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

impl Script {
    pub fn new(name: &str) -> Script {
        Script {
            lines: vec![format!("gmt begin {}", shell_quote(name))],
            shown: false,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines[..]
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// The whole script, one command per line.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn push(&mut self, line: String) {
        debug!(%line, "figure command");
        self.lines.push(line);
    }
}

impl Figure for Script {
    type Grid = RemoteGrid;

    fn contour(&mut self, grid: &RemoteGrid, opts: &ContourOptions) -> Result<()> {
        opts.validate()?;
        let mut cmd = format!("gmt grdcontour {} -R{} -C{}",
                              shell_quote(&grid.dataset),
                              grid.region,
                              opts.interval);
        if let Some(a) = opts.annotation {
            cmd.push_str(&format!(" -A{}", a));
        }
        if let Some((lo, hi)) = opts.limit {
            cmd.push_str(&format!(" -L{}/{}", lo, hi));
        }
        if let Some(ref j) = opts.projection {
            cmd.push_str(&format!(" -J{}", shell_quote(j)));
        }
        if opts.frame {
            cmd.push_str(" -Baf");
        }
        self.push(cmd);
        Ok(())
    }

    fn image(&mut self, grid: &RemoteGrid, opts: &ImageOptions) -> Result<()> {
        opts.validate()?;
        let mut cmd = format!("gmt grdimage {} -R{} -C{}",
                              shell_quote(&grid.dataset),
                              grid.region,
                              shell_quote(&opts.cmap));
        if let Some(ref j) = opts.projection {
            cmd.push_str(&format!(" -J{}", shell_quote(j)));
        }
        if opts.frame {
            cmd.push_str(" -Baf");
        }
        self.push(cmd);
        Ok(())
    }

    fn text(&mut self, at: GeoPoint, opts: &TextOptions) -> Result<()> {
        let record = format!("{} {} {}", at.longitude(), at.latitude(), opts.text);
        let mut cmd = format!("echo {} | gmt text", shell_quote(&record));
        if opts.font.is_some() || opts.justify.is_some() {
            cmd.push_str(" -F");
            if let Some(ref font) = opts.font {
                cmd.push_str(&format!("+f{}", shell_quote(font)));
            }
            if let Some(ref justify) = opts.justify {
                cmd.push_str(&format!("+j{}", shell_quote(justify)));
            }
        }
        self.push(cmd);
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        if self.shown {
            return Err(Error::InvalidJob("figure was already shown".to_string()));
        }
        self.push("gmt end show".to_string());
        self.shown = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds;

    fn grid() -> RemoteGrid {
        RemoteGrid {
            dataset: "@earth_relief_01s".to_string(),
            region: Bounds {
                west: 10.5,
                east: 11.5,
                south: 49.25,
                north: 49.75,
            },
        }
    }

    #[test]
    fn contour_command() {
        let mut s = Script::new("map");
        let opts = ContourOptions {
            annotation: Some(1000.0),
            limit: Some((-4000.0, -2000.0)),
            projection: Some("M10c".to_string()),
            frame: true,
            ..ContourOptions::new(250.0)
        };
        s.contour(&grid(), &opts).unwrap();
        assert_eq!(s.lines()[1],
                   "gmt grdcontour @earth_relief_01s -R10.500000/11.500000/49.250000/49.750000 \
                    -C250 -A1000 -L-4000/-2000 -JM10c -Baf");
    }

    #[test]
    fn plain_contour_command() {
        let mut s = Script::new("map");
        s.contour(&grid(), &ContourOptions::new(50.0)).unwrap();
        assert!(s.lines()[1].ends_with("-C50"));
    }

    #[test]
    fn image_and_text_commands() {
        let mut s = Script::new("map");
        let image = ImageOptions {
            cmap: "haxby".to_string(),
            projection: Some("M10c".to_string()),
            frame: true,
        };
        s.image(&grid(), &image).unwrap();
        let label = TextOptions {
            text: "Nürnberg".to_string(),
            position: None,
            font: Some("8p,Helvetica-Bold,black".to_string()),
            justify: Some("CM".to_string()),
        };
        s.text(GeoPoint::new(49.45, 11.07).unwrap(), &label).unwrap();
        s.show().unwrap();
        assert_eq!(s.lines(),
                   &["gmt begin map".to_string(),
                     "gmt grdimage @earth_relief_01s -R10.500000/11.500000/49.250000/49.750000 \
                      -Chaxby -JM10c -Baf"
                         .to_string(),
                     "echo '11.07 49.45 Nürnberg' | gmt text -F+f8p,Helvetica-Bold,black+jCM"
                         .to_string(),
                     "gmt end show".to_string()][..]);
        assert!(s.is_shown());
        assert!(s.render().ends_with("gmt end show\n"));
    }

    #[test]
    fn text_without_style_and_quotes() {
        let mut s = Script::new("map");
        let label = TextOptions {
            text: "Peter's hut".to_string(),
            position: None,
            font: None,
            justify: None,
        };
        s.text(GeoPoint::new(47.0, 10.0).unwrap(), &label).unwrap();
        assert_eq!(s.lines()[1], "echo '10 47 Peter'\\''s hut' | gmt text");
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut s = Script::new("map");
        assert!(s.contour(&grid(), &ContourOptions::new(0.0)).is_err());
        let empty_limit = ContourOptions {
            limit: Some((10.0, 10.0)),
            ..ContourOptions::new(10.0)
        };
        assert!(empty_limit.validate().is_err());
        let negative_annotation = ContourOptions {
            annotation: Some(-5.0),
            ..ContourOptions::new(10.0)
        };
        assert!(negative_annotation.validate().is_err());
        let no_cmap = ImageOptions {
            cmap: " ".to_string(),
            projection: None,
            frame: false,
        };
        assert!(s.image(&grid(), &no_cmap).is_err());
        assert_eq!(s.lines().len(), 1);
    }

    #[test]
    fn free_form_words_are_quoted() {
        let s = Script::new("my map");
        assert_eq!(s.lines()[0], "gmt begin 'my map'");

        let mut s = Script::new("map");
        let opts = ContourOptions {
            projection: Some("M10c; touch /tmp/x".to_string()),
            ..ContourOptions::new(50.0)
        };
        s.contour(&grid(), &opts).unwrap();
        assert!(s.lines()[1].ends_with("-C50 -J'M10c; touch /tmp/x'"), "{}", s.lines()[1]);

        let image = ImageOptions {
            cmap: "haxby $(id)".to_string(),
            projection: Some("M10c".to_string()),
            frame: false,
        };
        s.image(&grid(), &image).unwrap();
        assert!(s.lines()[2].ends_with("-C'haxby $(id)' -JM10c"), "{}", s.lines()[2]);

        let label = TextOptions {
            text: "peak".to_string(),
            position: None,
            font: Some("8p,Helvetica,black|rm".to_string()),
            justify: Some("CM&".to_string()),
        };
        s.text(GeoPoint::new(47.0, 10.0).unwrap(), &label).unwrap();
        assert_eq!(s.lines()[3], "echo '10 47 peak' | gmt text -F+f'8p,Helvetica,black|rm'+j'CM&'");
    }

    #[test]
    fn remote_dataset_name_is_quoted() {
        let mut s = Script::new("map");
        let g = RemoteGrid {
            dataset: "@my relief".to_string(),
            ..grid()
        };
        s.contour(&g, &ContourOptions::new(10.0)).unwrap();
        assert!(s.lines()[1].starts_with("gmt grdcontour '@my relief' -R"));
    }

    #[test]
    fn show_twice_fails() {
        let mut s = Script::new("map");
        s.show().unwrap();
        assert!(s.show().is_err());
    }
}
