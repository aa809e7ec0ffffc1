//! Alien Invasion - a fixed-timestep fleet shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, fleet layout, collisions, per-frame update)
//! - `game`: Frame entry points consumed by a platform front-end
//! - `scoreboard`: Display-ready score labels
//! - `platform`: Draw/input/clock interfaces plus a headless implementation
//! - `renderer`: WebGPU rect pipeline used by the browser front-end

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod ui;

pub use error::ConfigError;
pub use game::{Flow, Game};
pub use scoreboard::Scoreboard;
pub use settings::Settings;
pub use stats::GameStats;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    use crate::platform::Color;

    /// Target frame rate of the fixed-timestep loop (all speeds are px/frame)
    pub const FRAME_RATE: u32 = 60;

    /// Ships granted at the start of every session
    pub const SHIP_LIMIT: u32 = 3;
    /// Freeze after losing a ship
    pub const LIFE_LOST_PAUSE: Duration = Duration::from_millis(500);

    /// Ship sprite footprint
    pub const SHIP_WIDTH: i32 = 60;
    pub const SHIP_HEIGHT: i32 = 48;
    /// Alien sprite footprint
    pub const ALIEN_WIDTH: i32 = 60;
    pub const ALIEN_HEIGHT: i32 = 58;

    /// Scoreboard placement and font
    pub const SCORE_MARGIN: i32 = 20;
    pub const SCORE_FONT_SIZE: u32 = 48;
    pub const SCORE_TEXT_COLOR: Color = Color::rgb(30, 30, 30);

    /// Play button
    pub const BUTTON_WIDTH: i32 = 200;
    pub const BUTTON_HEIGHT: i32 = 50;
    pub const BUTTON_COLOR: Color = Color::rgb(0, 135, 0);
    pub const BUTTON_TEXT_COLOR: Color = Color::rgb(255, 255, 255);
    pub const BUTTON_FONT_SIZE: u32 = 48;

    /// Entity colours (sprite art is supplied by the platform when available)
    pub const SHIP_COLOR: Color = Color::rgb(40, 80, 160);
    pub const ALIEN_COLOR: Color = Color::rgb(60, 160, 60);
}
