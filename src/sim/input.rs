//! Input routing
//!
//! Translates raw platform events into game commands, then applies them to
//! the session. Unmapped events are dropped silently.

use super::rect::HitTest;
use super::state::{GamePhase, GameState};
use super::tick::start_session;
use crate::platform::{InputEvent, Key};

/// What an input event asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set or clear the move-left intent
    MoveLeft(bool),
    /// Set or clear the move-right intent
    MoveRight(bool),
    Fire,
    /// Mouse press at screen coordinates
    Click { x: i32, y: i32 },
    /// Quit key or window close
    Exit,
}

/// Map a single event; `None` for anything the game ignores
pub fn route(event: &InputEvent) -> Option<Command> {
    match *event {
        InputEvent::Quit => Some(Command::Exit),
        InputEvent::KeyDown(key) => match key {
            Key::Left => Some(Command::MoveLeft(true)),
            Key::Right => Some(Command::MoveRight(true)),
            Key::Space => Some(Command::Fire),
            Key::Q => Some(Command::Exit),
            Key::Other(_) => None,
        },
        InputEvent::KeyUp(key) => match key {
            Key::Left => Some(Command::MoveLeft(false)),
            Key::Right => Some(Command::MoveRight(false)),
            _ => None,
        },
        InputEvent::MouseDown { x, y } => Some(Command::Click { x, y }),
    }
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Handled,
    Ignored,
    Exit,
}

/// Apply a command to the session. `play_button` starts a session when
/// clicked while not Active.
pub fn apply(state: &mut GameState, command: Command, play_button: &impl HitTest) -> Applied {
    match command {
        Command::MoveLeft(held) => {
            state.ship.moving_left = held;
            Applied::Handled
        }
        Command::MoveRight(held) => {
            state.ship.moving_right = held;
            Applied::Handled
        }
        Command::Fire => {
            if state.is_active() && state.fire_bullet() {
                Applied::Handled
            } else {
                Applied::Ignored
            }
        }
        Command::Click { x, y } => {
            let clicked = play_button.hit_test(x, y);
            if clicked && state.phase != GamePhase::Active {
                start_session(state);
                Applied::Handled
            } else {
                Applied::Ignored
            }
        }
        Command::Exit => Applied::Exit,
    }
}
