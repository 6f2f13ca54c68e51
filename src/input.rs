//! Input module - per-action repeat state machine and key bindings
//!
//! The resolver keeps one `{pressed, cooldown, delay}` slot per logical
//! action, indexed by `Action` rather than by raw key identifier. The
//! session reads it once per frame:
//!
//! 1. A fresh press is immediately active (cooldown 0).
//! 2. After acting, the session arms repeat timing with
//!    `set_hold_cooldown`; the first repeat waits an extra delay
//!    (delayed auto shift), later repeats use only the cooldown.
//! 3. One-shot actions call `disable_hold`, which parks the cooldown at a
//!    negative sentinel: no repeat until the key is released.
//! 4. `tick()` decrements armed cooldowns once per processed frame.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Action;

/// Sentinel cooldown meaning "no repeat until key release"
const DISABLED: i32 = -1;

#[derive(Debug, Clone, Copy, Default)]
struct KeySlot {
    pressed: bool,
    cooldown: i32,
    /// First repeat after a fresh press waits the extra delay
    repeating: bool,
}

/// Per-action input state, consumed once per frame by the session
#[derive(Debug, Clone, Default)]
pub struct InputState {
    slots: [KeySlot; Action::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw key-down for the key bound to `action`
    pub fn key_down(&mut self, action: Action) {
        let slot = &mut self.slots[action.index()];
        if !slot.pressed {
            slot.pressed = true;
            slot.cooldown = 0;
            slot.repeating = false;
        }
    }

    /// Raw key-up for the key bound to `action`
    pub fn key_up(&mut self, action: Action) {
        self.slots[action.index()] = KeySlot::default();
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.slots[action.index()].pressed
    }

    /// Pressed and cooled down; the session acts exactly when this is true
    pub fn is_active(&self, action: Action) -> bool {
        let slot = &self.slots[action.index()];
        slot.pressed && slot.cooldown == 0
    }

    /// Arm repeat timing after acting on `action`. The first repeat after a
    /// press waits `cooldown + delay` frames, later repeats `cooldown`.
    pub fn set_hold_cooldown(&mut self, action: Action, cooldown: i32, delay: i32) {
        let slot = &mut self.slots[action.index()];
        slot.cooldown = if slot.repeating {
            cooldown
        } else {
            slot.repeating = true;
            cooldown + delay
        };
    }

    /// Suppress repeats entirely until the key is released
    pub fn disable_hold(&mut self, action: Action) {
        self.slots[action.index()].cooldown = DISABLED;
    }

    /// Release every action. Fallback for terminals that never deliver
    /// key-up events; the runner calls it after each processed frame so a
    /// press acts once and terminal auto-repeat drives further presses.
    pub fn release_all(&mut self) {
        self.slots = [KeySlot::default(); Action::COUNT];
    }

    /// Advance armed cooldowns by one frame
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            if slot.cooldown > 0 {
                slot.cooldown -= 1;
            }
        }
    }
}

/// Raw-key-to-action mapping, remappable through `Config`
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    bound: [KeyCode; Action::COUNT],
}

impl KeyBindings {
    /// The action bound to a raw key, if any
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| self.bound[action.index()] == code)
    }

    pub fn key_for(&self, action: Action) -> KeyCode {
        self.bound[action.index()]
    }

    pub fn bind(&mut self, action: Action, code: KeyCode) {
        self.bound[action.index()] = code;
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bound = [KeyCode::Null; Action::COUNT];
        bound[Action::MoveLeft.index()] = KeyCode::Left;
        bound[Action::MoveRight.index()] = KeyCode::Right;
        bound[Action::RotateCw.index()] = KeyCode::Up;
        bound[Action::RotateCcw.index()] = KeyCode::Char('z');
        bound[Action::SoftDrop.index()] = KeyCode::Down;
        bound[Action::HardDrop.index()] = KeyCode::Char(' ');
        bound[Action::Hold.index()] = KeyCode::Char('c');
        Self { bound }
    }
}

/// Check if a key event should quit the runner
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
