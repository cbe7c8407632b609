use crate::geometry::Projection;

/// A map position in projection units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate { x, y }
    }
}

/// One user click on the map together with the view state it happened in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub coordinate: Coordinate,
    pub resolution: f64,
    pub projection: Projection,
}

impl ClickEvent {
    pub fn new(coordinate: impl Into<Coordinate>, resolution: f64, projection: Projection) -> Self {
        Self {
            coordinate: coordinate.into(),
            resolution,
            projection,
        }
    }

    /// Click at a lon/lat position, with the view resolution taken from a zoom level.
    pub fn at_lon_lat(lon: f64, lat: f64, zoom: u8, projection: Projection) -> Self {
        let extent = projection.extent();
        let max_resolution = extent.width().max(extent.height()) / 256.0;
        Self::new(
            projection.from_lon_lat(lon, lat),
            max_resolution / 2f64.powi(zoom as i32),
            projection,
        )
    }
}
