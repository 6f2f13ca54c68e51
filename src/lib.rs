//! A falling-block puzzle engine with a terminal front end.
//!
//! The engine is split into small modules around one [`Session`] per game:
//!
//! - [`field`]: the playing grid of [`Tile`]s
//! - [`piece`]: tetromino shapes, wall kicks, and piece kinematics
//! - [`queue`]: seeded 7-bag randomizer with a preview lookahead
//! - [`input`]: per-action press/repeat state and key bindings
//! - [`session`]: gravity, scoring, leveling, hold, and game over
//! - [`term`]: crossterm renderer
//!
//! The session is purely synchronous; a driving loop feeds it raw key
//! transitions and calls [`Session::tick`] as fast as it likes, and the
//! internal frame clock decides when a frame actually runs.

pub mod config;
pub mod field;
pub mod input;
pub mod piece;
pub mod queue;
pub mod session;
pub mod term;
pub mod types;

pub use config::Config;
pub use field::{Field, Tile};
pub use input::{InputState, KeyBindings};
pub use piece::Piece;
pub use queue::PieceQueue;
pub use session::Session;
pub use types::{Action, PieceKind, Rgb, Rotation};
