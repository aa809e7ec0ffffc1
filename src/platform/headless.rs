//! Windowless platform
//!
//! Replays scripted input, records draw calls instead of rasterizing them,
//! and keeps virtual time unless real-time throttling is requested. Drives
//! the native demo runner and loop-level tests.

use std::collections::VecDeque;
use std::time::Duration;

use super::{Canvas, Color, FrameClock, InputEvent, Platform};
use crate::scoreboard::Label;
use crate::sim::Rect;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill(Color),
    Rect(Rect, Color),
    Label(String, Rect),
}

/// Draw calls of the frame being built
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl Canvas for RecordingCanvas {
    fn fill(&mut self, color: Color) {
        // A fill starts a new frame
        self.calls.clear();
        self.calls.push(DrawCall::Fill(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn draw_label(&mut self, label: &Label) {
        self.calls.push(DrawCall::Label(label.text.clone(), label.rect));
    }
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// Events delivered one batch per frame; empty batches once exhausted
    script: VecDeque<Vec<InputEvent>>,
    canvas: RecordingCanvas,
    /// Last presented frame
    pub presented: Vec<DrawCall>,
    pub frames_presented: u64,
    pub cursor_visible: bool,
    /// Virtual time spent in `sleep` and `tick`
    pub elapsed: Duration,
    /// Number of blocking sleeps requested (life-lost freezes)
    pub sleeps: u32,
    clock: Option<FrameClock>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Default::default()
        }
    }

    /// Throttle `tick` and `sleep` against the wall clock
    pub fn realtime(mut self) -> Self {
        self.clock = Some(FrameClock::new());
        self
    }

    /// Queue one frame's worth of events
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(events);
    }
}

impl Platform for HeadlessPlatform {
    type Canvas = RecordingCanvas;

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn canvas(&mut self) -> &mut RecordingCanvas {
        &mut self.canvas
    }

    fn present_frame(&mut self) {
        self.presented = std::mem::take(&mut self.canvas.calls);
        self.frames_presented += 1;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps += 1;
        self.elapsed += duration;
        if let Some(clock) = &mut self.clock {
            std::thread::sleep(duration);
            clock.reset();
        }
    }

    fn tick(&mut self, target_fps: u32) {
        match &mut self.clock {
            Some(clock) => self.elapsed += clock.tick(target_fps),
            None => self.elapsed += Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
        }
    }
}
