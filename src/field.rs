//! Field module - manages the playing grid
//!
//! The field is a `width x height` grid where each tile is empty, a ghost
//! preview marker, or occupied by a locked/active piece cell. Uses flat
//! row-major storage. Coordinates are (row, col) with row 0 at the top.
//! Ghost tiles are transient: they never block movement and are recomputed
//! every frame.

use arrayvec::ArrayVec;

use crate::types::Rgb;

/// One cell of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Ghost,
    Occupied(Rgb),
}

/// The playing grid, created once per session at fixed dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: i16,
    height: i16,
    /// Flat array of tiles, row-major order (row * width + col)
    tiles: Vec<Tile>,
}

impl Field {
    /// Create a new empty field
    pub fn new(width: i16, height: i16) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= self.height || col < 0 || col >= self.width {
            return None;
        }
        Some((row as usize) * (self.width as usize) + (col as usize))
    }

    /// Get the tile at (row, col).
    /// `None` is the explicit out-of-bounds signal; it is never conflated
    /// with occupancy.
    pub fn tile(&self, row: i16, col: i16) -> Option<Tile> {
        self.index(row, col).map(|idx| self.tiles[idx])
    }

    /// In bounds and not occupied (ghost tiles count as open)
    pub fn is_open(&self, row: i16, col: i16) -> bool {
        matches!(self.tile(row, col), Some(Tile::Empty) | Some(Tile::Ghost))
    }

    /// In bounds and occupied
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.tile(row, col), Some(Tile::Occupied(_)))
    }

    /// Mark a cell occupied with the given color. Out-of-bounds is ignored;
    /// validation is the caller's responsibility.
    pub fn fill(&mut self, row: i16, col: i16, color: Rgb) {
        if let Some(idx) = self.index(row, col) {
            self.tiles[idx] = Tile::Occupied(color);
        }
    }

    /// Reset a cell to empty
    pub fn clear(&mut self, row: i16, col: i16) {
        if let Some(idx) = self.index(row, col) {
            self.tiles[idx] = Tile::Empty;
        }
    }

    /// Place a ghost marker. Only empty cells are marked, so the active
    /// piece's own cells are never overwritten.
    pub fn set_ghost(&mut self, row: i16, col: i16) {
        if let Some(idx) = self.index(row, col) {
            if self.tiles[idx] == Tile::Empty {
                self.tiles[idx] = Tile::Ghost;
            }
        }
    }

    /// Remove all ghost markers (done once per frame before recomputing)
    pub fn clear_ghosts(&mut self) {
        for tile in &mut self.tiles {
            if *tile == Tile::Ghost {
                *tile = Tile::Empty;
            }
        }
    }

    /// Check if a row is completely occupied
    pub fn row_is_full(&self, row: i16) -> bool {
        if row < 0 || row >= self.height {
            return false;
        }
        let start = (row as usize) * (self.width as usize);
        let end = start + self.width as usize;
        self.tiles[start..end]
            .iter()
            .all(|tile| matches!(tile, Tile::Occupied(_)))
    }

    /// Remove row `row`, shift all rows above it down by one, and insert an
    /// empty row at the top.
    pub fn clear_row(&mut self, row: i16) {
        let Some(_) = self.index(row, 0) else {
            return;
        };

        let width = self.width as usize;
        for r in (1..=row as usize).rev() {
            let src = (r - 1) * width;
            let dst = r * width;
            self.tiles.copy_within(src..src + width, dst);
        }

        for tile in &mut self.tiles[0..width] {
            *tile = Tile::Empty;
        }
    }

    /// Apply a multi-row clear in one pass. Rows are cleared in ascending
    /// index order: clearing row r only moves rows above r, so the indices
    /// of still-pending (lower) rows stay valid.
    pub fn clear_rows(&mut self, rows: &[i16]) {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        for &row in rows {
            self.clear_row(row);
        }
    }

    /// Full rows among the given candidates, ascending and deduplicated.
    /// A locked piece spans at most 4 distinct rows.
    pub fn full_rows_among(&self, candidates: &[i16]) -> ArrayVec<i16, 4> {
        let mut full: ArrayVec<i16, 4> = ArrayVec::new();
        for &row in candidates {
            if self.row_is_full(row) && !full.contains(&row) {
                full.push(row);
            }
        }
        full.sort_unstable();
        full
    }

    /// Count of open cells straight below (row, col), stopping at the first
    /// occupied cell or the floor.
    pub fn space_below(&self, row: i16, col: i16) -> i16 {
        let mut count = 0;
        while self.is_open(row + count + 1, col) {
            count += 1;
        }
        count
    }

    /// Count of open cells to the left of (row, col)
    pub fn space_left(&self, row: i16, col: i16) -> i16 {
        let mut count = 0;
        while self.is_open(row, col - count - 1) {
            count += 1;
        }
        count
    }

    /// Count of open cells to the right of (row, col)
    pub fn space_right(&self, row: i16, col: i16) -> i16 {
        let mut count = 0;
        while self.is_open(row, col + count + 1) {
            count += 1;
        }
        count
    }
}
