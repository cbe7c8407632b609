pub mod projection;
pub mod tile_grid;

pub use projection::Projection;
pub use tile_grid::{TileCoord, TileGrid};
