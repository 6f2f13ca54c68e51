//! Session module - the per-game state machine
//!
//! Ties together field, piece, queue and input: frame gating, gravity,
//! input resolution, piece lifecycle (spawn -> active -> lock -> next),
//! line clears, scoring, leveling and game-over detection. One session
//! owns one field; everything runs synchronously on the driving loop's
//! thread.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::config::Config;
use crate::field::Field;
use crate::input::InputState;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::types::{Action, PieceKind, GRAVITY_FLOOR, GRAVITY_STEP, LINE_SCORES, SOFT_DROP_SCORE};

/// Wall-clock frame gate. Carries the remainder past each interval so the
/// cadence does not drift.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_micros(1_000_000 / fps.max(1) as u64),
            last: Instant::now(),
        }
    }

    /// True once per elapsed frame interval, keeping the remainder
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed > self.interval {
            let remainder_us = elapsed.as_micros() % self.interval.as_micros();
            self.last = now - Duration::from_micros(remainder_us as u64);
            true
        } else {
            false
        }
    }
}

/// One game session
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    field: Field,
    queue: PieceQueue,
    current: Piece,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    level: u32,
    lines: u32,
    fall_counter: u32,
    playing: bool,
    clock: FrameClock,
}

impl Session {
    /// Create a session and spawn the first piece
    pub fn new(config: Config, seed: u32) -> Self {
        let mut queue = PieceQueue::new(seed, config.lookahead);
        let mut field = Field::new(config.field_width, config.field_height);
        let current = Piece::new(queue.dequeue_next());

        let playing = current.spawn_is_open(&field);
        if playing {
            current.draw(&mut field);
        }

        let clock = FrameClock::new(config.fps);
        let level = config.start_level;
        Self {
            config,
            field,
            queue,
            current,
            hold: None,
            can_hold: true,
            score: 0,
            level,
            lines: 0,
            fall_counter: 0,
            playing,
            clock,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Frame-gated step. Returns true when a frame was processed.
    pub fn tick(&mut self, input: &mut InputState) -> bool {
        if self.clock.tick(Instant::now()) {
            self.step(input);
            true
        } else {
            false
        }
    }

    /// Advance one frame: redraw ghost and piece, apply gravity, resolve
    /// input, consume one input tick. No-op once the game is over.
    pub fn step(&mut self, input: &mut InputState) {
        if !self.playing {
            return;
        }

        // Ghost markers are transient: wipe and recompute every frame.
        self.field.clear_ghosts();
        self.current.draw(&mut self.field);
        self.current.draw_ghost(&mut self.field);

        self.fall_counter += 1;
        if self.fall_counter > self.gravity_threshold() {
            if !self.current.translate(&mut self.field, 1, 0) {
                self.lock();
            }
            self.fall_counter = 0;
        }

        if self.playing {
            self.resolve_input(input);
        }
        input.tick();
    }

    /// Frames the fall counter must exceed before gravity pulls, clamped
    /// at the floor
    fn gravity_threshold(&self) -> u32 {
        let base = self.config.fall_interval() as i32;
        let level = self.level as i32;
        (base - GRAVITY_STEP * (level - 1)).max(GRAVITY_FLOOR) as u32
    }

    fn resolve_input(&mut self, input: &mut InputState) {
        let cooldown = self.config.repeat_cooldown;
        let delay = self.config.repeat_delay;

        if input.is_active(Action::MoveLeft) {
            self.current.translate(&mut self.field, 0, -1);
            input.set_hold_cooldown(Action::MoveLeft, cooldown, delay);
        }
        if input.is_active(Action::MoveRight) {
            self.current.translate(&mut self.field, 0, 1);
            input.set_hold_cooldown(Action::MoveRight, cooldown, delay);
        }
        if input.is_active(Action::RotateCw) {
            self.current.rotate(&mut self.field, true);
            input.disable_hold(Action::RotateCw);
        }
        if input.is_active(Action::RotateCcw) {
            self.current.rotate(&mut self.field, false);
            input.disable_hold(Action::RotateCcw);
        }
        if input.is_active(Action::SoftDrop) {
            if self.current.translate(&mut self.field, 1, 0) {
                self.score += SOFT_DROP_SCORE;
                self.fall_counter = 0;
            }
            input.set_hold_cooldown(Action::SoftDrop, self.config.soft_drop_cooldown, 0);
        }
        if input.is_active(Action::HardDrop) {
            self.score += self.current.hard_drop(&mut self.field);
            self.lock();
            input.disable_hold(Action::HardDrop);
        }
        if self.playing && self.config.hold_enabled && input.is_active(Action::Hold) {
            if self.can_hold {
                self.hold_swap();
            }
            input.disable_hold(Action::Hold);
        }
    }

    /// Commit the active piece: clear completed lines among its rows,
    /// score, re-level, then spawn the next piece. A piece whose topmost
    /// cell locked in row 0 ends the game.
    fn lock(&mut self) {
        self.field.clear_ghosts();
        let top_row = self.current.top_row();

        let rows: ArrayVec<i16, 4> = self.current.cells().iter().map(|&(r, _)| r).collect();
        let full = self.field.full_rows_among(&rows);
        self.field.clear_rows(&full);

        let cleared = full.len();
        self.score += LINE_SCORES[cleared] * (self.level + 1);
        self.lines += cleared as u32;
        self.level = self.lines / 10 + self.config.start_level;

        if top_row <= 0 {
            self.playing = false;
            return;
        }

        self.spawn_next();
    }

    /// Dequeue and place the next piece. Blocked spawn cells end the game.
    fn spawn_next(&mut self) {
        let piece = Piece::new(self.queue.dequeue_next());
        self.current = piece;

        if !piece.spawn_is_open(&self.field) {
            self.playing = false;
            return;
        }

        self.current.draw(&mut self.field);
        self.can_hold = true;
        self.fall_counter = 0;
    }

    /// Swap the active piece with the hold slot (spawning from the queue
    /// when the slot is empty). One hold per piece lifetime.
    fn hold_swap(&mut self) {
        self.current.erase(&mut self.field);

        match self.hold.replace(self.current.kind()) {
            Some(held) => {
                let piece = Piece::new(held);
                self.current = piece;
                if !piece.spawn_is_open(&self.field) {
                    self.playing = false;
                    return;
                }
                self.current.draw(&mut self.field);
                self.fall_counter = 0;
            }
            None => self.spawn_next(),
        }

        self.can_hold = false;
    }
}
