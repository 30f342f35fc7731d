use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};

use crate::types::Bounds;

/// Kilometers per degree of latitude on the spherical earth the relief scripts assume.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Compute the length in meters of one degree latitude and longitude at given latitude degree.
pub fn lat_lon(lat: f64) -> (f64, f64) {
    // Port of http://msi.nga.mil/MSISiteContent/StaticFiles/Calculators/degree.html
    let lat = lat.to_radians();
    let m1 = 111132.92;
    let m2 = -559.82;
    let m3 = 1.175;
    let m4 = -0.0023;
    let p1 = 111412.84;
    let p2 = -93.5;
    let p3 = 0.118;

    // Calculate the length of a degree of latitude and longitude in meters
    let latlen = m1 + (m2 * (2.0 * lat).cos()) + (m3 * (4.0 * lat).cos()) +
                 (m4 * (6.0 * lat).cos());
    let longlen = (p1 * lat.cos()) + (p2 * (3.0 * lat).cos()) + (p3 * (5.0 * lat).cos());
    (latlen, longlen)
}

/// Length in kilometers of one degree latitude and longitude at given latitude degree, on a
/// sphere with `KM_PER_DEGREE` kilometers per degree of arc.
pub fn spherical_lat_lon(lat: f64) -> (f64, f64) {
    (KM_PER_DEGREE, KM_PER_DEGREE * lat.to_radians().cos())
}

/// Build a GeoJSON polygon feature tracing the outline of the bounds, counterclockwise from the
/// southwest corner. The feature also carries the bounds as its `bbox` member.
pub fn bounds_feature(b: &Bounds, name: Option<&str>) -> Feature {
    let ring = vec![vec![b.west, b.south],
                    vec![b.east, b.south],
                    vec![b.east, b.north],
                    vec![b.west, b.north],
                    vec![b.west, b.south]];
    let properties = name.map(|n| {
        let mut props = JsonObject::new();
        props.insert("name".to_string(), JsonValue::from(n));
        props
    });
    Feature {
        bbox: Some(vec![b.west, b.south, b.east, b.north]),
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties,
        foreign_members: None,
    }
}
