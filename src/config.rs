//! Config module - immutable session tuning
//!
//! All tuning lives in one value handed to `Session::new`; nothing reads
//! global state at runtime.

use crate::input::KeyBindings;
use crate::types::{
    DEFAULT_FPS, DEFAULT_LOOKAHEAD, DEFAULT_REPEAT_COOLDOWN, DEFAULT_REPEAT_DELAY,
    DEFAULT_SOFT_DROP_COOLDOWN, FIELD_HEIGHT, FIELD_WIDTH,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// Target steps per second of the driving loop
    pub fps: u32,
    pub field_width: i16,
    pub field_height: i16,
    /// Lookahead queue length
    pub lookahead: usize,
    /// Whether the hold slot is available at all
    pub hold_enabled: bool,
    /// Extra frames before the first auto-repeat of a held key
    pub repeat_delay: i32,
    /// Frames between auto-repeats of a held key
    pub repeat_cooldown: i32,
    /// Frames between soft-drop repeats (no first-repeat delay)
    pub soft_drop_cooldown: i32,
    /// Level the session starts at
    pub start_level: u32,
    pub bindings: KeyBindings,
}

impl Config {
    /// Gravity base interval in frames
    pub fn fall_interval(&self) -> u32 {
        2 * self.fps
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            lookahead: DEFAULT_LOOKAHEAD,
            hold_enabled: true,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_cooldown: DEFAULT_REPEAT_COOLDOWN,
            soft_drop_cooldown: DEFAULT_SOFT_DROP_COOLDOWN,
            start_level: 1,
            bindings: KeyBindings::default(),
        }
    }
}
