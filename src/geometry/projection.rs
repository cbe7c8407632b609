use crate::models::geometry::GeometryExtent;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// WebMercator constants
const R_MAJOR: f64 = 6378137.0;
const MAX_LAT: f64 = 85.05112877980659; // Max bounds for Web Mercator
const MERCATOR_BOUND: f64 = 20037508.342789244;

/// Projections a click can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Projection {
    /// EPSG:3857 and its legacy aliases.
    WebMercator,
    /// EPSG:4326, latitude-first under WMS 1.3.0.
    Geographic,
    /// CRS:84, same extent as 4326 but longitude-first.
    Crs84,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Projection::WebMercator => "EPSG:3857",
            Projection::Geographic => "EPSG:4326",
            Projection::Crs84 => "CRS:84",
        }
    }

    pub fn extent(&self) -> GeometryExtent {
        match self {
            Projection::WebMercator => GeometryExtent::from((
                -MERCATOR_BOUND,
                -MERCATOR_BOUND,
                MERCATOR_BOUND,
                MERCATOR_BOUND,
            )),
            Projection::Geographic | Projection::Crs84 => {
                GeometryExtent::from((-180.0, -90.0, 180.0, 90.0))
            }
        }
    }

    /// True when WMS 1.3.0 expects the BBOX as `miny,minx,maxy,maxx`.
    pub fn is_lat_first(&self) -> bool {
        matches!(self, Projection::Geographic)
    }

    /// Converts a lon/lat pair into this projection's units.
    pub fn from_lon_lat(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::WebMercator => lon_lat_to_mercator(lon, lat),
            Projection::Geographic | Projection::Crs84 => (lon, lat),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" => Ok(Projection::WebMercator),
            "EPSG:4326" => Ok(Projection::Geographic),
            "CRS:84" => Ok(Projection::Crs84),
            other => Err(format!("Unsupported projection: '{}'", other)),
        }
    }
}

/// from longitude, latitude (degrees) → Web Mercator (x, y in meters)
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    // clamp latitude into Mercator’s valid range
    let clamped_lat = lat.clamp(-MAX_LAT, MAX_LAT);

    let x = lon * R_MAJOR * PI / 180.0;
    let lat_rad = clamped_lat * PI / 180.0;
    let y = R_MAJOR * ((PI / 4.0 + lat_rad / 2.0).tan().ln());
    (x, y)
}
