//! Bounding boxes around a point, sized by a radius in kilometers.
//!
//! A degree of latitude is treated as a constant length everywhere, while a degree of longitude
//! shrinks with the cosine of the latitude as meridians converge. The result is a box whose
//! north-south extent is twice the radius anywhere on the globe, and whose east-west extent is
//! twice the radius along the center latitude only.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Bounds, GeoPoint};
use crate::util::{lat_lon, spherical_lat_lon};

/// How kilometers on the ground convert to degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeModel {
    /// 111 km per degree of latitude, scaled by cos(latitude) for longitude.
    #[default]
    Spherical,
    /// Degree lengths on the WGS84 ellipsoid, see `util::lat_lon`.
    Ellipsoidal,
}

impl DegreeModel {
    /// Kilometers per degree (latitude, longitude) at given latitude degree.
    pub fn km_per_degree(&self, lat: f64) -> (f64, f64) {
        match *self {
            DegreeModel::Spherical => spherical_lat_lon(lat),
            DegreeModel::Ellipsoidal => {
                let (latlen, lonlen) = lat_lon(lat);
                (latlen / 1000.0, lonlen / 1000.0)
            }
        }
    }
}

/// Degrees of (latitude, longitude) covering `radius_km` kilometers at given latitude. Only the
/// poles themselves are rejected; any latitude strictly between them gets a finite, possibly
/// very wide, longitude delta.
pub fn degree_deltas(lat: f64, radius_km: f64, model: DegreeModel) -> Result<(f64, f64)> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(Error::InvalidRadius(radius_km));
    }
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidLatitude(lat));
    }
    if lat.abs() == 90.0 {
        return Err(Error::PolarSingularity(lat));
    }
    let (lat_km, lon_km) = model.km_per_degree(lat);
    let delta_lat = radius_km / lat_km;
    let delta_lon = radius_km / lon_km;
    if !delta_lon.is_finite() || delta_lon <= 0.0 {
        return Err(Error::PolarSingularity(lat));
    }
    debug!(lat, radius_km, ?model, delta_lat, delta_lon, "degree deltas");
    Ok((delta_lat, delta_lon))
}

/// Compute the bounds extending `radius_km` kilometers from `center` in each direction, using
/// the spherical model.
pub fn compute(center: GeoPoint, radius_km: f64) -> Result<Bounds> {
    compute_with(center, radius_km, DegreeModel::Spherical)
}

/// Compute the bounds extending `radius_km` kilometers from `center` in each direction.
pub fn compute_with(center: GeoPoint, radius_km: f64, model: DegreeModel) -> Result<Bounds> {
    let (lat, lon) = (center.latitude(), center.longitude());
    let (delta_lat, delta_lon) = degree_deltas(lat, radius_km, model)?;
    Ok(Bounds {
        west: lon - delta_lon,
        east: lon + delta_lon,
        south: lat - delta_lat,
        north: lat + delta_lat,
    })
}

/// Size of the bounds in kilometers (north-south, east-west), the latter measured along the
/// center latitude.
pub fn extent_km(b: &Bounds, model: DegreeModel) -> (f64, f64) {
    let (lat_km, lon_km) = model.km_per_degree(b.center().0);
    (b.range_lat() * lat_km, b.range_lon() * lon_km)
}
