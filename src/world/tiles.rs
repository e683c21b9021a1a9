//! The floor grid the arena is played on.
//!
//! Each cell is `TILE_SIZE` pixels square; the play field is exactly the
//! pixel extent of the grid.

use glam::Vec2;
use rand::Rng;

use super::Color;

pub const TILE_SIZE: f32 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub color: Color,
}

/// The three floors a session can start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorStyle {
    Grass,
    Stone,
    Dirt,
}

impl FloorStyle {
    pub const ALL: [FloorStyle; 3] = [FloorStyle::Grass, FloorStyle::Stone, FloorStyle::Dirt];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// (colour, columns, rows)
    pub fn layout(self) -> (Color, usize, usize) {
        match self {
            FloorStyle::Grass => (Color::GREEN, 10, 10),
            FloorStyle::Stone => (Color::STONE, 9, 9),
            FloorStyle::Dirt => (Color::SADDLE_BROWN, 11, 11),
        }
    }
}

/// Column-major tile grid (`cells[x * rows + y]`).
#[derive(Debug, Clone)]
pub struct TileMap {
    cols: usize,
    rows: usize,
    cells: Vec<Tile>,
}

impl TileMap {
    pub fn filled(tile: Tile, cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![tile; cols * rows],
        }
    }

    pub fn from_style(style: FloorStyle) -> Self {
        let (color, cols, rows) = style.layout();
        Self::filled(Tile { color }, cols, rows)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        (x < self.cols && y < self.rows).then(|| &self.cells[x * self.rows + y])
    }

    /// Overwrite one cell; returns `false` when `(x, y)` is off the grid.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        if x >= self.cols || y >= self.rows {
            return false;
        }
        self.cells[x * self.rows + y] = tile;
        true
    }

    /// Iterate `(x, y, tile)` in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, t)| (i / self.rows, i % self.rows, t))
    }

    /// Pixel extent of the whole grid (the play field).
    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * TILE_SIZE, self.rows as f32 * TILE_SIZE)
    }

    /// Tile coordinate containing a pixel-space point.
    #[inline]
    pub fn tile_of(p: Vec2) -> (i32, i32) {
        (
            (p.x / TILE_SIZE).floor() as i32,
            (p.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Top-left pixel position that centres a box of `size` in tile `(tx, ty)`.
    pub fn centre_in_tile(tx: usize, ty: usize, size: Vec2) -> Vec2 {
        let half = TILE_SIZE / 2.0;
        Vec2::new(
            (TILE_SIZE * tx as f32 - size.x / 2.0 + half).floor(),
            (TILE_SIZE * ty as f32 - size.y / 2.0 + half).floor(),
        )
    }

    /// Centre tile of the grid (used for the player start).
    #[inline]
    pub fn middle(&self) -> (usize, usize) {
        (self.cols / 2, self.rows / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_have_expected_extents() {
        let m = TileMap::from_style(FloorStyle::Grass);
        assert_eq!(m.pixel_size(), Vec2::new(350.0, 350.0));
        let m = TileMap::from_style(FloorStyle::Stone);
        assert_eq!(m.pixel_size(), Vec2::new(315.0, 315.0));
        assert_eq!(m.get(0, 0).unwrap().color, Color::STONE);
        assert!(m.get(9, 0).is_none());
    }

    #[test]
    fn tile_conversions() {
        assert_eq!(TileMap::tile_of(Vec2::new(34.9, 35.0)), (0, 1));
        // player 20×20 in tile (5, 5): 175 - 10 + 17.5 = 182.5 → 182
        assert_eq!(
            TileMap::centre_in_tile(5, 5, Vec2::splat(20.0)),
            Vec2::new(182.0, 182.0)
        );
    }

    #[test]
    fn set_and_iterate() {
        let mut m = TileMap::filled(Tile { color: Color::GREEN }, 2, 3);
        assert!(m.set(1, 2, Tile { color: Color::RED }));
        assert!(!m.set(2, 0, Tile { color: Color::RED }));
        let red: Vec<_> = m
            .iter()
            .filter(|(_, _, t)| t.color == Color::RED)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(red, vec![(1, 2)]);
        assert_eq!(m.iter().count(), 6);
    }
}
