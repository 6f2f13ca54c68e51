//! Core types shared across the engine
//! Pure data with no external dependencies.

/// Default field dimensions (rows x columns)
pub const FIELD_WIDTH: i16 = 10;
pub const FIELD_HEIGHT: i16 = 20;

/// Target frame rate of the driving loop
pub const DEFAULT_FPS: u32 = 60;

/// Lookahead queue length
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Input repeat timing (frames)
pub const DEFAULT_REPEAT_DELAY: i32 = 9;
pub const DEFAULT_REPEAT_COOLDOWN: i32 = 3;
pub const DEFAULT_SOFT_DROP_COOLDOWN: i32 = 2;

/// Gravity threshold clamp and per-level speedup (frames)
pub const GRAVITY_FLOOR: i32 = 3;
pub const GRAVITY_STEP: i32 = 3;

/// Line clear scoring, indexed by number of lines, multiplied by (level + 1)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Score per cell for soft and hard drops
pub const SOFT_DROP_SCORE: u32 = 1;
pub const HARD_DROP_SCORE: u32 = 2;

/// An RGB color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Preview color for the ghost piece
pub const GHOST_COLOR: Rgb = Rgb::new(0, 255, 120);

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    J,
    L,
    S,
    Z,
    T,
    I,
    O,
}

impl PieceKind {
    /// All seven kinds, one bag's worth
    pub const ALL: [PieceKind; 7] = [
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
    ];

    /// Fill color used when this kind's cells are drawn into the field
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 128, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
            PieceKind::T => Rgb::new(128, 0, 128),
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 0),
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
        }
    }
}

/// Rotation states (R0 = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// Index into the kick tables (pre-rotation state)
    pub const fn index(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    /// Advance clockwise (+1 mod 4)
    pub const fn cw(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    /// Advance counter-clockwise (-1 mod 4)
    pub const fn ccw(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R3,
            Rotation::R3 => Rotation::R2,
            Rotation::R2 => Rotation::R1,
            Rotation::R1 => Rotation::R0,
        }
    }
}

/// The seven logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
    Hold,
}

impl Action {
    pub const COUNT: usize = 7;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::RotateCw,
        Action::RotateCcw,
        Action::SoftDrop,
        Action::HardDrop,
        Action::Hold,
    ];

    /// Index into per-action state tables
    pub const fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::RotateCw => 2,
            Action::RotateCcw => 3,
            Action::SoftDrop => 4,
            Action::HardDrop => 5,
            Action::Hold => 6,
        }
    }
}
