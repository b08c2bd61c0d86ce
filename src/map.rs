//! The tile grid a level is played on.
//!
//! A `TileGrid` is validated once at construction (rectangular, closed border)
//! and is immutable afterwards.  Every lookup is bounds-checked; anything
//! outside the grid reads as "no tile", which callers treat as blocking.

use crate::entities::Tile;
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from rows of tile codes.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != width {
                return Err(GameError::NonRectangularGrid {
                    row,
                    expected: width,
                    actual: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(GameError::UnknownTile { code, col, row })?;
                tiles.push(tile);
            }
        }

        let grid = TileGrid { width, height, tiles };
        grid.check_border()?;
        Ok(grid)
    }

    fn check_border(&self) -> Result<(), GameError> {
        for row in 0..self.height {
            for col in 0..self.width {
                let on_border =
                    row == 0 || col == 0 || row == self.height - 1 || col == self.width - 1;
                if on_border && !self.tiles[row * self.width + col].is_blocking() {
                    return Err(GameError::OpenBorder { col, row });
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at integer cell coordinates, `None` outside the grid.
    pub fn get(&self, col: i64, row: i64) -> Option<Tile> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(self.tiles[row as usize * self.width + col as usize])
    }

    /// Tile containing the continuous point `(x, y)`.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<Tile> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.get(x.floor() as i64, y.floor() as i64)
    }

    /// Walls and anything off-grid block.
    pub fn is_blocking_at(&self, x: f64, y: f64) -> bool {
        self.tile_at(x, y).map_or(true, Tile::is_blocking)
    }

    /// Strictly an EMPTY cell (not EXIT).  Sprites and knockback only move
    /// into these.
    pub fn is_empty_at(&self, x: f64, y: f64) -> bool {
        self.tile_at(x, y) == Some(Tile::Empty)
    }

    /// Rows top to bottom, for the minimap.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }
}
