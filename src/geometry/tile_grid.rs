use crate::geometry::projection::Projection;
use crate::models::geometry::GeometryExtent;

/// Deepest zoom level of a default grid.
pub const MAX_ZOOM: usize = 42;
pub const DEFAULT_TILE_SIZE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub z: usize,
    pub x: u64,
    pub y: u64,
}

/// Top-left origin tile grid covering a projection's extent, halving the
/// resolution at every zoom level.
#[derive(Debug, Clone)]
pub struct TileGrid {
    extent: GeometryExtent,
    tile_size: u32,
    resolutions: Vec<f64>,
}

impl TileGrid {
    pub fn for_projection(projection: Projection, tile_size: u32) -> Self {
        let extent = projection.extent();
        let size = tile_size as f64;
        let max_resolution = (extent.width() / size).max(extent.height() / size);
        let resolutions = (0..=MAX_ZOOM)
            .map(|z| max_resolution / 2f64.powi(z as i32))
            .collect();

        Self {
            extent,
            tile_size,
            resolutions,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn resolution(&self, z: usize) -> Option<f64> {
        self.resolutions.get(z).copied()
    }

    /// Level whose resolution is nearest to `resolution`; ties go to the finer level.
    pub fn z_for_resolution(&self, resolution: f64) -> usize {
        let last = self.resolutions.len() - 1;
        if self.resolutions[0] <= resolution {
            return 0;
        }
        if resolution <= self.resolutions[last] {
            return last;
        }
        for z in 1..=last {
            let finer = self.resolutions[z];
            if finer == resolution {
                return z;
            }
            if finer < resolution {
                let coarser = self.resolutions[z - 1];
                return if coarser - resolution < resolution - finer {
                    z - 1
                } else {
                    z
                };
            }
        }
        last
    }

    /// Tile holding `(x, y)` at level `z`, or `None` outside the grid.
    pub fn tile_coord_for(&self, x: f64, y: f64, z: usize) -> Option<TileCoord> {
        let resolution = self.resolution(z)?;
        if !self.extent.contains(x, y) {
            return None;
        }

        let span = resolution * self.tile_size as f64;
        let cols = (self.extent.width() / span).ceil().max(1.0) as u64;
        let rows = (self.extent.height() / span).ceil().max(1.0) as u64;
        // A point on the max edge belongs to the last tile
        let col = (((x - self.extent.minx) / span).floor() as u64).min(cols - 1);
        let row = (((self.extent.maxy - y) / span).floor() as u64).min(rows - 1);

        Some(TileCoord { z, x: col, y: row })
    }

    pub fn tile_extent(&self, coord: TileCoord) -> Option<GeometryExtent> {
        let span = self.resolution(coord.z)? * self.tile_size as f64;
        let minx = self.extent.minx + coord.x as f64 * span;
        let maxy = self.extent.maxy - coord.y as f64 * span;
        Some(GeometryExtent::from((minx, maxy - span, minx + span, maxy)))
    }
}
