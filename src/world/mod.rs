mod color;
mod geometry;
mod tiles;

pub use color::{Color, ColorError};
pub use geometry::{Aabb, Direction, angle_between, heading, normalize_deg, to_cardinal};
pub use tiles::{FloorStyle, TILE_SIZE, Tile, TileMap};
