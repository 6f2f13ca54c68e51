//! Piece module - tetromino shapes, wall kicks, and kinematics
//!
//! A piece is four relative (row, col) cell offsets plus a field offset and
//! a rotation state. The active piece's cells live in the field itself:
//! every committed mutation erases the old cells, validates the candidate
//! cells, and redraws. Rejected mutations leave the piece byte-for-byte
//! unchanged.

use arrayvec::ArrayVec;

use crate::field::Field;
use crate::types::{PieceKind, Rotation};

/// Offset of a single cell relative to the piece origin (row, col)
pub type CellOffset = (i16, i16);

/// Shape of a piece - 4 cell offsets from the piece origin
pub type Shape = [CellOffset; 4];

/// Canonical start offset (row, col) for newly spawned pieces
pub const SPAWN_OFFSET: (i16, i16) = (1, 4);

/// Spawn-orientation shape for a piece kind
pub const fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::J => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        PieceKind::L => [(0, -1), (0, 0), (0, 1), (-1, 1)],
        PieceKind::S => [(-1, 0), (-1, 1), (0, -1), (0, 0)],
        PieceKind::Z => [(-1, -1), (-1, 0), (0, 0), (0, 1)],
        PieceKind::T => [(-1, 0), (0, -1), (0, 0), (0, 1)],
        PieceKind::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
    }
}

/// Wall kick offsets, (row, col), keyed by pre-rotation state.
/// Tried in order after the unkicked candidate; clockwise entries, with
/// counter-clockwise derived by negating the entries of `state - 1 mod 4`.
pub type KickTable = [[CellOffset; 4]; 4];

/// Kick table shared by J, L, S, Z and T
pub const KICKS_JLSTZ: KickTable = [
    // R0 -> R1
    [(0, -1), (-1, -1), (2, 0), (2, -1)],
    // R1 -> R2
    [(0, 1), (1, 1), (-2, 0), (-2, 1)],
    // R2 -> R3
    [(0, 1), (-1, 1), (2, 0), (2, 1)],
    // R3 -> R0
    [(0, -1), (1, -1), (-2, 0), (-2, -1)],
];

/// Kick table for the I piece
pub const KICKS_I: KickTable = [
    // R0 -> R1
    [(0, -2), (0, 1), (1, -2), (-2, 1)],
    // R1 -> R2
    [(0, -1), (0, 2), (-2, -1), (1, 2)],
    // R2 -> R3
    [(0, 2), (0, -1), (-1, 2), (2, -1)],
    // R3 -> R0
    [(0, 1), (0, -2), (2, 1), (-1, -2)],
];

/// Ordered kick candidates for one rotation attempt: no kick first, then
/// the table entries for the transition.
pub fn kick_candidates(
    kind: PieceKind,
    rotation: Rotation,
    clockwise: bool,
) -> ArrayVec<CellOffset, 5> {
    let table = match kind {
        PieceKind::I => &KICKS_I,
        _ => &KICKS_JLSTZ,
    };

    let mut candidates: ArrayVec<CellOffset, 5> = ArrayVec::new();
    candidates.push((0, 0));
    if clockwise {
        for &kick in &table[rotation.index()] {
            candidates.push(kick);
        }
    } else {
        // CCW from state s mirrors CW into s: same entries, negated.
        for &(kr, kc) in &table[(rotation.index() + 3) % 4] {
            candidates.push((-kr, -kc));
        }
    }
    candidates
}

/// Rotate a shape by one step. Non-I kinds transpose/negate around the
/// origin; the I piece swaps its coordinate indices (self-inverse, shared
/// by both directions).
fn rotated_shape(kind: PieceKind, shape: &Shape, clockwise: bool) -> Shape {
    let mut out = *shape;
    for cell in &mut out {
        let (r, c) = *cell;
        *cell = match (kind, clockwise) {
            (PieceKind::I, _) => (c, r),
            (_, true) => (c, -r),
            (_, false) => (-c, r),
        };
    }
    out
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    row: i16,
    col: i16,
    rotation: Rotation,
}

impl Piece {
    /// Create a piece at the canonical start offset in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            row: SPAWN_OFFSET.0,
            col: SPAWN_OFFSET.1,
            rotation: Rotation::R0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn offset(&self) -> (i16, i16) {
        (self.row, self.col)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The 4 absolute (row, col) cells the piece occupies
    pub fn cells(&self) -> [(i16, i16); 4] {
        self.shape
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// Topmost absolute row the piece occupies
    pub fn top_row(&self) -> i16 {
        let [first, rest @ ..] = self.cells();
        rest.iter().fold(first.0, |top, &(r, _)| top.min(r))
    }

    /// All 4 candidate cells in bounds and unoccupied
    fn fits(field: &Field, shape: &Shape, row: i16, col: i16) -> bool {
        shape
            .iter()
            .all(|&(dr, dc)| field.is_open(row + dr, col + dc))
    }

    /// Whether the piece's spawn cells are free (checked before placing)
    pub fn spawn_is_open(&self, field: &Field) -> bool {
        Self::fits(field, &self.shape, self.row, self.col)
    }

    /// Draw the piece's cells into the field
    pub fn draw(&self, field: &mut Field) {
        let color = self.kind.color();
        for (r, c) in self.cells() {
            field.fill(r, c, color);
        }
    }

    /// Erase the piece's cells from the field
    pub fn erase(&self, field: &mut Field) {
        for (r, c) in self.cells() {
            field.clear(r, c);
        }
    }

    /// Mark the ghost preview at the hard-drop landing position
    pub fn draw_ghost(&self, field: &mut Field) {
        let d = self.ghost_offset(field);
        if d == 0 {
            return;
        }
        for (r, c) in self.cells() {
            field.set_ghost(r + d, c);
        }
    }

    /// Propose a move by (dr, dc). Legal iff all 4 resulting cells are in
    /// bounds and unoccupied; on rejection the prior offset is retained.
    pub fn translate(&mut self, field: &mut Field, dr: i16, dc: i16) -> bool {
        self.erase(field);
        let ok = Self::fits(field, &self.shape, self.row + dr, self.col + dc);
        if ok {
            self.row += dr;
            self.col += dc;
        }
        self.draw(field);
        ok
    }

    /// Rotate with kick resolution. The O piece never rotates. Candidates
    /// are tried in table order; the first fully valid kick wins, otherwise
    /// shape, offset and rotation state are all unchanged.
    pub fn rotate(&mut self, field: &mut Field, clockwise: bool) -> bool {
        if self.kind == PieceKind::O {
            return false;
        }

        let rotated = rotated_shape(self.kind, &self.shape, clockwise);
        self.erase(field);

        let mut turned = false;
        for (kr, kc) in kick_candidates(self.kind, self.rotation, clockwise) {
            if Self::fits(field, &rotated, self.row + kr, self.col + kc) {
                self.shape = rotated;
                self.row += kr;
                self.col += kc;
                self.rotation = if clockwise {
                    self.rotation.cw()
                } else {
                    self.rotation.ccw()
                };
                turned = true;
                break;
            }
        }

        self.draw(field);
        turned
    }

    /// Vertical distance straight down to the first collision, computed
    /// from the bottom-most occupied cell per distinct column.
    pub fn ghost_offset(&self, field: &Field) -> i16 {
        let mut bottoms: ArrayVec<(i16, i16), 4> = ArrayVec::new();
        for (r, c) in self.cells() {
            match bottoms.iter_mut().find(|(_, bc)| *bc == c) {
                Some(entry) => entry.0 = entry.0.max(r),
                None => bottoms.push((r, c)),
            }
        }

        bottoms
            .iter()
            .map(|&(r, c)| field.space_below(r, c))
            .min()
            .unwrap_or(0)
    }

    /// Drop to the ghost position and return the earned score
    /// (2 points per cell). No-op when already grounded.
    pub fn hard_drop(&mut self, field: &mut Field) -> u32 {
        let d = self.ghost_offset(field);
        if d == 0 {
            return 0;
        }
        self.erase(field);
        self.row += d;
        self.draw(field);
        crate::types::HARD_DROP_SCORE * d as u32
    }

    /// Restore spawn shape, offset and rotation (hold swap-in)
    pub fn reset(&mut self) {
        self.shape = spawn_shape(self.kind);
        self.row = SPAWN_OFFSET.0;
        self.col = SPAWN_OFFSET.1;
        self.rotation = Rotation::R0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, Rgb};

    fn empty_field() -> Field {
        Field::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_spawn_cells_in_bounds() {
        let field = empty_field();
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            for (r, c) in piece.cells() {
                assert!(
                    field.tile(r, c).is_some(),
                    "{:?} spawn cell ({}, {}) out of bounds",
                    kind,
                    r,
                    c
                );
            }
        }
    }

    #[test]
    fn test_top_row_tracks_highest_cell() {
        assert_eq!(Piece::new(PieceKind::T).top_row(), 0);
        assert_eq!(Piece::new(PieceKind::I).top_row(), 1);
        assert_eq!(Piece::new(PieceKind::O).top_row(), 1);

        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);
        piece.translate(&mut field, 7, 0);
        assert_eq!(piece.top_row(), 7);
    }

    #[test]
    fn test_translate_moves_and_redraws() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);

        assert!(piece.translate(&mut field, 0, 1));
        assert_eq!(piece.offset(), (1, 5));
        for (r, c) in piece.cells() {
            assert!(field.is_occupied(r, c));
        }
        // The vacated cell is empty again.
        assert_eq!(field.tile(1, 3), Some(crate::field::Tile::Empty));
    }

    #[test]
    fn test_translate_rejected_at_wall() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::I);
        piece.draw(&mut field);

        // I spawn spans cols 3..=6; 4 left moves hit the wall.
        for _ in 0..3 {
            assert!(piece.translate(&mut field, 0, -1));
        }
        let before = piece;
        assert!(!piece.translate(&mut field, 0, -1));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_translate_rejected_by_occupied_cell() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::O);
        piece.draw(&mut field);

        // O spawn cells are rows 1-2, cols 4-5. Block the cell below.
        field.fill(3, 4, Rgb::new(1, 2, 3));
        let before = piece;
        assert!(!piece.translate(&mut field, 1, 0));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_o_piece_never_rotates() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::O);
        piece.draw(&mut field);

        let before = piece;
        assert!(!piece.rotate(&mut field, true));
        assert_eq!(piece, before);
        assert!(!piece.rotate(&mut field, false));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_full_cw_cycle_restores_piece() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            let mut field = empty_field();
            let mut piece = Piece::new(kind);
            // Keep clear of the spawn-row ceiling so no kick is needed.
            piece.translate(&mut field, 5, 0);
            let before = piece;

            for _ in 0..4 {
                assert!(piece.rotate(&mut field, true), "{:?} rotation failed", kind);
            }
            assert_eq!(piece, before, "{:?} did not return to spawn state", kind);
        }
    }

    #[test]
    fn test_ccw_undoes_cw() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            let mut field = empty_field();
            let mut piece = Piece::new(kind);
            piece.translate(&mut field, 5, 0);
            let before = piece;

            assert!(piece.rotate(&mut field, true));
            assert!(piece.rotate(&mut field, false));
            assert_eq!(piece, before);
        }
    }

    #[test]
    fn test_rotation_rejected_leaves_state_unchanged() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::I);
        piece.translate(&mut field, 5, 0);

        // Box the piece in so no kick candidate can succeed.
        for r in 0..FIELD_HEIGHT {
            for c in 0..FIELD_WIDTH {
                if !piece.cells().contains(&(r, c)) {
                    field.fill(r, c, Rgb::new(9, 9, 9));
                }
            }
        }

        let before = piece;
        assert!(!piece.rotate(&mut field, true));
        assert_eq!(piece, before);
        assert!(!piece.rotate(&mut field, false));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_floor_kick_resolves_rotation() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);
        while piece.translate(&mut field, 1, 0) {}
        assert_eq!(piece.offset(), (19, 4));

        // Unkicked and (0, -1) candidates poke through the floor;
        // (-1, -1) is the first that fits.
        assert!(piece.rotate(&mut field, true));
        assert_eq!(piece.rotation(), Rotation::R1);
        assert_eq!(piece.offset(), (18, 3));
        for (r, c) in piece.cells() {
            assert!(field.is_occupied(r, c));
        }
    }

    #[test]
    fn test_ghost_offset_uses_per_column_bottoms() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);

        // T spawn: top cell (0, 4), bottom row 1 across cols 3..=5.
        assert_eq!(piece.ghost_offset(&field), FIELD_HEIGHT - 2);

        // A column stack under the left arm shortens the drop.
        field.fill(10, 3, Rgb::new(1, 1, 1));
        assert_eq!(piece.ghost_offset(&field), 8);
    }

    #[test]
    fn test_hard_drop_scores_twice_distance() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);

        let d = piece.ghost_offset(&field);
        let score = piece.hard_drop(&mut field);
        assert_eq!(score, 2 * d as u32);
        assert_eq!(piece.offset().0, SPAWN_OFFSET.0 + d);
        for (r, c) in piece.cells() {
            assert!(field.is_occupied(r, c));
        }
    }

    #[test]
    fn test_hard_drop_grounded_is_noop() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::T);
        piece.draw(&mut field);
        piece.hard_drop(&mut field);

        let before = piece;
        assert_eq!(piece.hard_drop(&mut field), 0);
        assert_eq!(piece, before);
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut field = empty_field();
        let mut piece = Piece::new(PieceKind::J);
        piece.draw(&mut field);
        piece.translate(&mut field, 4, 2);
        piece.rotate(&mut field, true);

        piece.erase(&mut field);
        piece.reset();
        assert_eq!(piece, Piece::new(PieceKind::J));
    }

    #[test]
    fn test_ccw_kicks_negate_previous_state_cw_entries() {
        let candidates = kick_candidates(PieceKind::T, Rotation::R1, false);
        assert_eq!(candidates[0], (0, 0));
        for (i, &(kr, kc)) in KICKS_JLSTZ[0].iter().enumerate() {
            assert_eq!(candidates[i + 1], (-kr, -kc));
        }
    }
}
