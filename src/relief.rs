use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::Bounds;

/// Grid spacing of an earth relief dataset, named the way the remote dataset names them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resolution {
    OneDegree,
    ThirtyMinutes,
    TwentyMinutes,
    FifteenMinutes,
    TenMinutes,
    SixMinutes,
    FiveMinutes,
    FourMinutes,
    ThreeMinutes,
    TwoMinutes,
    OneMinute,
    ThirtySeconds,
    FifteenSeconds,
    ThreeSeconds,
    #[default]
    OneSecond,
}

use self::Resolution::*;

static ALL: [Resolution; 15] = [OneDegree,
                                ThirtyMinutes,
                                TwentyMinutes,
                                FifteenMinutes,
                                TenMinutes,
                                SixMinutes,
                                FiveMinutes,
                                FourMinutes,
                                ThreeMinutes,
                                TwoMinutes,
                                OneMinute,
                                ThirtySeconds,
                                FifteenSeconds,
                                ThreeSeconds,
                                OneSecond];

impl Resolution {
    /// Every resolution, coarsest first.
    pub fn all() -> impl Iterator<Item = Resolution> {
        ALL.iter().cloned()
    }

    /// Identifier such as `01s` or `15m`.
    pub fn code(&self) -> &'static str {
        match *self {
            OneDegree => "01d",
            ThirtyMinutes => "30m",
            TwentyMinutes => "20m",
            FifteenMinutes => "15m",
            TenMinutes => "10m",
            SixMinutes => "06m",
            FiveMinutes => "05m",
            FourMinutes => "04m",
            ThreeMinutes => "03m",
            TwoMinutes => "02m",
            OneMinute => "01m",
            ThirtySeconds => "30s",
            FifteenSeconds => "15s",
            ThreeSeconds => "03s",
            OneSecond => "01s",
        }
    }

    /// Spacing between grid nodes in arc seconds.
    pub fn arc_seconds(&self) -> f64 {
        match *self {
            OneDegree => 3600.0,
            ThirtyMinutes => 1800.0,
            TwentyMinutes => 1200.0,
            FifteenMinutes => 900.0,
            TenMinutes => 600.0,
            SixMinutes => 360.0,
            FiveMinutes => 300.0,
            FourMinutes => 240.0,
            ThreeMinutes => 180.0,
            TwoMinutes => 120.0,
            OneMinute => 60.0,
            ThirtySeconds => 30.0,
            FifteenSeconds => 15.0,
            ThreeSeconds => 3.0,
            OneSecond => 1.0,
        }
    }

    /// Spacing between grid nodes in degrees.
    pub fn spacing(&self) -> f64 {
        self.arc_seconds() / 3600.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Resolution> {
        Resolution::all()
            .find(|r| r.code() == s)
            .ok_or_else(|| Error::UnknownResolution(s.to_string()))
    }
}

impl TryFrom<String> for Resolution {
    type Error = Error;

    fn try_from(s: String) -> Result<Resolution> {
        s.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> String {
        r.code().to_string()
    }
}

/// What a relief provider is asked for: a resolution over a region.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliefRequest {
    pub resolution: Resolution,
    pub region: Bounds,
}

impl ReliefRequest {
    pub fn new(resolution: Resolution, region: Bounds) -> ReliefRequest {
        ReliefRequest { resolution, region }
    }

    /// Number of gridline-registered samples (rows, columns) the region spans. Counts too large
    /// for `usize` saturate at `usize::MAX`.
    pub fn estimated_size(&self) -> (usize, usize) {
        let spacing = self.resolution.spacing();
        (samples(self.region.range_lat(), spacing), samples(self.region.range_lon(), spacing))
    }
}

#[inline]
fn samples(span: f64, spacing: f64) -> usize {
    // Float to int casts saturate, NaN becomes 0.
    ((span / spacing).round().max(0.0) as usize).saturating_add(1)
}

/// Provider of gridded elevation data.
pub trait ReliefSource {
    type Grid;

    fn load(&self, request: &ReliefRequest) -> Result<Self::Grid>;
}

/// A grid that lives on a remote data server, referenced by dataset name and region.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteGrid {
    pub dataset: String,
    pub region: Bounds,
}

/// Names remote relief grids without downloading them. The renderer resolves the name.
#[derive(Debug, Clone)]
pub struct RemoteDataset {
    prefix: String,
}

impl RemoteDataset {
    pub fn new<S: Into<String>>(prefix: S) -> RemoteDataset {
        RemoteDataset { prefix: prefix.into() }
    }
}

impl Default for RemoteDataset {
    fn default() -> RemoteDataset {
        RemoteDataset::new("earth_relief")
    }
}

impl ReliefSource for RemoteDataset {
    type Grid = RemoteGrid;

    fn load(&self, request: &ReliefRequest) -> Result<RemoteGrid> {
        let dataset = format!("@{}_{}", self.prefix, request.resolution);
        let (rows, cols) = request.estimated_size();
        info!(%dataset, region = %request.region, rows, cols, "relief grid requested");
        Ok(RemoteGrid {
            dataset,
            region: request.region,
        })
    }
}
