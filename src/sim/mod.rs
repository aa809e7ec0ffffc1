//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (speeds are pixels per frame)
//! - No randomness; fleet layout is a function of screen and footprint
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod fleet;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{bullet_alien_pass, collide_pairs, collides_any, fleet_threatens_ship};
pub use fleet::{create_fleet, fleet_positions};
pub use input::{Applied, Command, apply, route};
pub use rect::{Bounded, HitTest, Rect};
pub use state::{Alien, Bullet, GameEvent, GamePhase, GameState, Ship};
pub use tick::{StepOutcome, start_session, tick};
