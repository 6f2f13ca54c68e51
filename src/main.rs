//! Terminal runner: owns the event loop, maps raw keys to logical actions,
//! and hands frames to the session.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::input::should_quit;
use gridfall::term::Terminal;
use gridfall::{Config, InputState, Session};

fn main() -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut session = Session::new(Config::default(), seed);
    let mut input = InputState::new();

    // The guard restores the terminal on drop, error paths included.
    let mut term = Terminal::new()?;
    run(&mut term, &mut session, &mut input)
}

fn run(term: &mut Terminal, session: &mut Session, input: &mut InputState) -> Result<()> {
    let bindings = session.config().bindings;
    let release_events = term.reports_key_release();
    term.draw(session)?;

    loop {
        // Short poll keeps input latency low without spinning.
        if event::poll(Duration::from_millis(2))? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = bindings.action_for(key.code) {
                            input.key_down(action);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = bindings.action_for(key.code) {
                            input.key_up(action);
                        }
                    }
                    KeyEventKind::Repeat => {}
                }
            }
        }

        if session.tick(input) {
            term.draw(session)?;
            if !release_events {
                // No key-up events from this terminal; make each press a
                // single action and let terminal auto-repeat re-press.
                input.release_all();
            }
        }
    }
}
