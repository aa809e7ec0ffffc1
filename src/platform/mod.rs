//! Platform abstraction layer
//!
//! The simulation never talks to a window, GPU or font rasterizer directly.
//! A front-end supplies:
//! - input events (`Platform::poll_events`)
//! - draw primitives (`Canvas`)
//! - text measurement (`TextMetrics`)
//! - blocking sleep and a frame-rate throttle
//!
//! `run` drives a `Game` against any `Platform`.

pub mod clock;
pub mod headless;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{Flow, Game};
use crate::scoreboard::Label;
use crate::sim::Rect;

pub use clock::FrameClock;
pub use headless::HeadlessPlatform;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for GPU vertex data
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }

    /// CSS colour string for DOM overlays
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Keys the game distinguishes; everything else arrives as `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Q,
    Other(u32),
}

/// Discrete input event sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Mouse button pressed at screen coordinates
    MouseDown { x: i32, y: i32 },
}

/// Draw primitives consumed by `Game::render`
pub trait Canvas {
    /// Clear the frame to a solid colour
    fn fill(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Draw a pre-laid-out text label
    fn draw_label(&mut self, label: &Label);
}

/// Text measurement used when laying out labels
pub trait TextMetrics {
    /// Rendered (width, height) of `text` at `font_size` pixels
    fn measure(&self, text: &str, font_size: u32) -> (i32, i32);
}

/// Monospace approximation: each glyph advances a fixed fraction of the
/// font size. Used headless and by the DOM overlay front-end.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 0.75,
        }
    }
}

impl TextMetrics for FixedAdvance {
    fn measure(&self, text: &str, font_size: u32) -> (i32, i32) {
        let glyphs = text.chars().count() as f32;
        let width = (glyphs * self.advance * font_size as f32).ceil() as i32;
        let height = (self.line_height * font_size as f32).ceil() as i32;
        (width, height)
    }
}

/// Everything the frame loop needs from the host
pub trait Platform {
    type Canvas: Canvas;

    /// Non-blocking; returns every event queued since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn canvas(&mut self) -> &mut Self::Canvas;
    /// Make the most recently drawn frame visible
    fn present_frame(&mut self);
    /// Show or hide the mouse cursor
    fn set_cursor_visible(&mut self, visible: bool);
    /// Block the calling thread
    fn sleep(&mut self, duration: Duration);
    /// Sleep whatever remains of the current frame budget
    fn tick(&mut self, target_fps: u32);
}

/// One iteration: sample input, step, render, throttle.
///
/// A life-lost freeze blocks here, after the frame is presented, and skips
/// the throttle for that frame.
pub fn run_frame<P: Platform>(game: &mut Game, platform: &mut P) -> Flow {
    let events = platform.poll_events();
    let flow = game.update(&events);
    if flow == Flow::Exit {
        return flow;
    }

    game.render(platform.canvas());
    platform.set_cursor_visible(game.cursor_visible());
    platform.present_frame();

    match flow {
        Flow::Freeze(duration) => platform.sleep(duration),
        _ => platform.tick(crate::consts::FRAME_RATE),
    }
    flow
}

/// Run until a quit request. `max_frames` bounds headless runs.
pub fn run<P: Platform>(game: &mut Game, platform: &mut P, max_frames: Option<u64>) -> Flow {
    let mut frames = 0u64;
    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            return Flow::Continue;
        }
        if run_frame(game, platform) == Flow::Exit {
            log::info!("Quit requested after {} frames", frames);
            return Flow::Exit;
        }
        frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance_measure() {
        let metrics = FixedAdvance::default();
        assert_eq!(metrics.measure("1,230", 48), (120, 36));
        assert_eq!(metrics.measure("", 48), (0, 36));
    }

    #[test]
    fn test_color_conversions() {
        let color = Color::rgb(255, 0, 51);
        assert_eq!(color.to_f32(), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(color.to_css(), "rgb(255, 0, 51)");
    }
}
