use crate::config::LayerConfig;
use crate::geometry::tile_grid::{DEFAULT_TILE_SIZE, TileGrid};
use crate::models::request::{FEATURE_COUNT, INFO_FORMAT};
use crate::models::{ClickEvent, Coordinate, FeatureInfoRequest};
use crate::traits::FeatureInfoSource;
use crate::traits::source::FeatureInfoParams;
use reqwest::Url;
use std::sync::Arc;

const WMS_VERSION: &str = "1.3.0";

/// Tiled WMS layer: works out which tile and pixel a click landed on and
/// asks the server about that pixel.
#[derive(Debug, Clone)]
pub struct WmsSource {
    base_url: Url,
    layer: String,
    tile_size: u32,
}

impl WmsSource {
    pub fn new(base_url: Url, layer: impl Into<String>) -> Self {
        Self {
            base_url,
            layer: layer.into(),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    pub fn from_config(config: &LayerConfig) -> Self {
        Self::new(config.base_url.clone(), config.layer.clone())
    }
}

impl FeatureInfoSource for WmsSource {
    fn layer_name(&self) -> &str {
        &self.layer
    }

    fn feature_info_url(&self, click: &ClickEvent, params: FeatureInfoParams<'_>) -> Option<Url> {
        if !click.resolution.is_finite() || click.resolution <= 0.0 {
            return None;
        }

        let grid = TileGrid::for_projection(click.projection, self.tile_size);
        let z = grid.z_for_resolution(click.resolution);
        let tile_resolution = grid.resolution(z)?;
        let Coordinate { x, y } = click.coordinate;
        let tile = grid.tile_coord_for(x, y, z)?;
        let extent = grid.tile_extent(tile)?;

        // Points on the grid's east or south edge land one pixel past the last tile
        let last_pixel = grid.tile_size().saturating_sub(1) as i64;
        let i = (((x - extent.minx) / tile_resolution).floor() as i64).clamp(0, last_pixel);
        let j = (((extent.maxy - y) / tile_resolution).floor() as i64).clamp(0, last_pixel);

        let bbox = if click.projection.is_lat_first() {
            [extent.miny, extent.minx, extent.maxy, extent.maxx]
        } else {
            [extent.minx, extent.miny, extent.maxx, extent.maxy]
        };
        let bbox = bbox.map(|v| v.to_string()).join(",");
        let size = grid.tile_size().to_string();

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("SERVICE", "WMS")
            .append_pair("VERSION", WMS_VERSION)
            .append_pair("REQUEST", "GetFeatureInfo")
            .append_pair("FORMAT", "image/png")
            .append_pair("TRANSPARENT", "true")
            .append_pair("QUERY_LAYERS", &self.layer)
            .append_pair("LAYERS", &self.layer)
            .append_pair("TILED", "true")
            .append_pair("INFO_FORMAT", params.info_format)
            .append_pair("FEATURE_COUNT", &params.feature_count.to_string())
            .append_pair("I", &i.to_string())
            .append_pair("J", &j.to_string())
            .append_pair("WIDTH", &size)
            .append_pair("HEIGHT", &size)
            .append_pair("CRS", click.projection.code())
            .append_pair("STYLES", "")
            .append_pair("BBOX", &bbox);
        Some(url)
    }
}

/// Builds the JSON feature-info query for the active layer.
#[derive(Clone)]
pub struct RequestBuilder {
    source: Arc<dyn FeatureInfoSource>,
}

impl RequestBuilder {
    pub fn new(source: Arc<dyn FeatureInfoSource>) -> Self {
        Self { source }
    }

    pub fn layer_name(&self) -> &str {
        self.source.layer_name()
    }

    /// `None` is a normal outcome: the layer has nothing to query at this click.
    pub fn build(&self, click: &ClickEvent) -> Option<FeatureInfoRequest> {
        let params = FeatureInfoParams {
            info_format: INFO_FORMAT,
            feature_count: FEATURE_COUNT,
        };
        self.source
            .feature_info_url(click, params)
            .map(|url| FeatureInfoRequest { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Projection;
    use std::collections::HashMap;

    fn source() -> WmsSource {
        WmsSource::new(
            Url::parse("http://localhost:8080/geoserver/wms").unwrap(),
            "topp:states",
        )
    }

    fn builder() -> RequestBuilder {
        RequestBuilder::new(Arc::new(source()))
    }

    fn query(request: &FeatureInfoRequest) -> HashMap<String, String> {
        request.url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_fixed_parameters() {
        let click = ClickEvent::at_lon_lat(-98.5, 39.8, 4, Projection::WebMercator);
        let request = builder().build(&click).expect("click inside the world");
        let params = query(&request);

        assert_eq!(request.url.host_str(), Some("localhost"));
        assert_eq!(request.url.path(), "/geoserver/wms");
        assert_eq!(params["SERVICE"], "WMS");
        assert_eq!(params["VERSION"], "1.3.0");
        assert_eq!(params["REQUEST"], "GetFeatureInfo");
        assert_eq!(params["INFO_FORMAT"], "application/json");
        assert_eq!(params["FEATURE_COUNT"], "10");
        assert_eq!(params["QUERY_LAYERS"], "topp:states");
        assert_eq!(params["LAYERS"], "topp:states");
        assert_eq!(params["CRS"], "EPSG:3857");
        assert_eq!(params["WIDTH"], "256");
        assert_eq!(params["HEIGHT"], "256");
        assert_eq!(params["STYLES"], "");
    }

    #[test]
    fn test_pixel_and_bbox_of_clicked_tile() {
        // z=1 north-east tile spans [0, 0, B, B]; the click sits a quarter in,
        // half a pixel off the grid lines
        let b = 20037508.342789244;
        let grid = TileGrid::for_projection(Projection::WebMercator, 256);
        let res = grid.resolution(1).unwrap();
        let click = ClickEvent::new(
            (b / 4.0 + res / 2.0, b - b / 4.0 - res / 2.0),
            res,
            Projection::WebMercator,
        );

        let params = query(&builder().build(&click).unwrap());
        assert_eq!(params["I"], "64");
        assert_eq!(params["J"], "64");

        let bbox: Vec<f64> = params["BBOX"].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(bbox.len(), 4);
        assert!((bbox[0] - 0.0).abs() < 1e-6);
        assert!((bbox[1] - 0.0).abs() < 1e-6);
        assert!((bbox[2] - b).abs() < 1e-6);
        assert!((bbox[3] - b).abs() < 1e-6);
    }

    #[test]
    fn test_geographic_bbox_is_lat_first() {
        let grid = TileGrid::for_projection(Projection::Geographic, 256);
        let click = ClickEvent::new((10.0, 20.0), grid.resolution(2).unwrap(), Projection::Geographic);

        let params = query(&builder().build(&click).unwrap());
        // z=2 tiles are 90° wide; (10, 20) falls in the one spanning lon 0..90, lat 0..90
        assert_eq!(params["BBOX"], "0,0,90,90");
        assert_eq!(params["CRS"], "EPSG:4326");

        let click = ClickEvent::new((-100.0, -10.0), grid.resolution(2).unwrap(), Projection::Geographic);
        let params = query(&builder().build(&click).unwrap());
        assert_eq!(params["BBOX"], "-90,-180,0,-90");
    }

    #[test]
    fn test_click_on_south_east_corner_stays_inside_tile() {
        let b = 20037508.342789244;
        let grid = TileGrid::for_projection(Projection::WebMercator, 256);
        let click = ClickEvent::new((b, -b), grid.resolution(2).unwrap(), Projection::WebMercator);

        let params = query(&builder().build(&click).expect("corner is inside the world"));
        assert_eq!(params["I"], "255");
        assert_eq!(params["J"], "255");
        assert_eq!(params["WIDTH"], "256");
    }

    #[test]
    fn test_pixel_indices_never_reach_tile_size() {
        let b = 20037508.342789244;
        let grid = TileGrid::for_projection(Projection::WebMercator, 256);
        for z in [0, 3, 7] {
            let res = grid.resolution(z).unwrap();
            for (x, y) in [(b, b), (-b, -b), (b, 0.0), (0.0, -b)] {
                let click = ClickEvent::new((x, y), res, Projection::WebMercator);
                let params = query(&builder().build(&click).unwrap());
                let i: i64 = params["I"].parse().unwrap();
                let j: i64 = params["J"].parse().unwrap();
                assert!((0..256).contains(&i) && (0..256).contains(&j), "z={} ({}, {})", z, x, y);
            }
        }
    }

    #[test]
    fn test_outside_extent_yields_none() {
        let click = ClickEvent::new((3.0e7, 0.0), 1000.0, Projection::WebMercator);
        assert!(builder().build(&click).is_none());
    }

    #[test]
    fn test_bad_resolution_yields_none() {
        for resolution in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let click = ClickEvent::new((0.0, 0.0), resolution, Projection::WebMercator);
            assert!(builder().build(&click).is_none(), "resolution {}", resolution);
        }
    }

    #[test]
    fn test_existing_base_query_is_preserved() {
        let source = WmsSource::new(
            Url::parse("https://maps.example.org/ows?map=/data/states.map").unwrap(),
            "states",
        );
        let click = ClickEvent::at_lon_lat(0.0, 0.0, 3, Projection::WebMercator);
        let request = RequestBuilder::new(Arc::new(source)).build(&click).unwrap();
        let params = query(&request);
        assert_eq!(params["map"], "/data/states.map");
        assert_eq!(params["LAYERS"], "states");
        assert!(request.as_str().starts_with("https://maps.example.org/ows?map="));
    }
}
