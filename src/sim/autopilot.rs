//! Demo autopilot
//!
//! Produces the input events a player would, from the current state alone:
//! press Play when no session is running, steer under the lowest alien and
//! fire when lined up. Deterministic, so demo runs are reproducible.

use super::rect::Rect;
use super::state::{GamePhase, GameState};
use crate::platform::{InputEvent, Key};

/// Horizontal slack (px) before the ship starts steering
const AIM_TOLERANCE: i32 = 6;

/// Tracks held keys so only transitions are emitted
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    left_held: bool,
    right_held: bool,
    fire_held: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for the coming frame
    pub fn events(&mut self, state: &GameState, play_button: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if state.phase != GamePhase::Active {
            self.release_all(&mut events);
            events.push(InputEvent::MouseDown {
                x: play_button.center_x(),
                y: play_button.center_y(),
            });
            return events;
        }

        let ship_x = state.ship.rect.center_x();
        // Lowest alien is the most urgent; ties go to the nearest column
        let target = state
            .aliens
            .iter()
            .max_by_key(|a| (a.rect.bottom(), -(a.rect.center_x() - ship_x).abs()))
            .map(|a| a.rect.center_x());

        let Some(target_x) = target else {
            self.release_all(&mut events);
            return events;
        };

        let offset = target_x - ship_x;
        self.set_key(&mut events, Key::Right, offset > AIM_TOLERANCE);
        self.set_key(&mut events, Key::Left, offset < -AIM_TOLERANCE);

        // Fire on alternate frames so each press is a fresh key-down
        let aligned = offset.abs() <= AIM_TOLERANCE * 3;
        if self.fire_held {
            events.push(InputEvent::KeyUp(Key::Space));
            self.fire_held = false;
        } else if aligned {
            events.push(InputEvent::KeyDown(Key::Space));
            self.fire_held = true;
        }

        events
    }

    fn set_key(&mut self, events: &mut Vec<InputEvent>, key: Key, down: bool) {
        let held = match key {
            Key::Left => &mut self.left_held,
            Key::Right => &mut self.right_held,
            _ => return,
        };
        if *held != down {
            *held = down;
            events.push(if down {
                InputEvent::KeyDown(key)
            } else {
                InputEvent::KeyUp(key)
            });
        }
    }

    fn release_all(&mut self, events: &mut Vec<InputEvent>) {
        self.set_key(events, Key::Left, false);
        self.set_key(events, Key::Right, false);
        if self.fire_held {
            events.push(InputEvent::KeyUp(Key::Space));
            self.fire_held = false;
        }
    }
}
