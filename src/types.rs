use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A map coordinate in decimal degrees. Latitude is always within [-90, 90] and longitude within
/// [-180, 180].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawPoint) -> Result<GeoPoint> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<GeoPoint> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Map bounds in degrees. Edges are not normalized, so a box close to a pole or the antimeridian
/// may reach past 90 degrees latitude or 180 degrees longitude.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn range_lat(&self) -> f64 {
        self.north - self.south
    }

    pub fn range_lon(&self) -> f64 {
        self.east - self.west
    }

    /// Midpoint of the box as (latitude, longitude).
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    /// True if the point lies inside the box or on its edge.
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.south <= p.latitude() && p.latitude() <= self.north && self.west <= p.longitude() &&
        p.longitude() <= self.east
    }

    /// The box in the `[west, east, south, north]` order relief providers take.
    pub fn region(&self) -> [f64; 4] {
        [self.west, self.east, self.south, self.north]
    }

    /// Copy of the box with south and north clamped to the valid latitude range.
    pub fn clamped(&self) -> Bounds {
        Bounds {
            south: ::num::clamp(self.south, -90.0, 90.0),
            north: ::num::clamp(self.north, -90.0, 90.0),
            ..*self
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "{:.6}/{:.6}/{:.6}/{:.6}",
               self.west,
               self.east,
               self.south,
               self.north)
    }
}
