use std::io;

use thiserror::Error;

/// Everything that can go wrong while computing a region or planning a map.
#[derive(Debug, Error)]
pub enum Error {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
    #[error("latitude {0} is too close to a pole to span longitude")]
    PolarSingularity(f64),
    #[error("unknown relief resolution {0:?}")]
    UnknownResolution(String),
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
    #[error("invalid map job: {0}")]
    InvalidJob(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
