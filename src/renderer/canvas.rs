//! Frame builder for the GPU front-end

use super::shapes::rect_quad;
use super::vertex::Vertex;
use crate::platform::{Canvas, Color};
use crate::scoreboard::Label;
use crate::sim::Rect;

/// Collects one frame's rectangles as vertices and its labels for the host
#[derive(Debug)]
pub struct FrameCanvas {
    screen_w: f32,
    screen_h: f32,
    pub clear: Color,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

impl FrameCanvas {
    pub fn new(screen: Rect) -> Self {
        Self {
            screen_w: screen.w.max(1) as f32,
            screen_h: screen.h.max(1) as f32,
            clear: Color::rgb(0, 0, 0),
            vertices: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl Canvas for FrameCanvas {
    fn fill(&mut self, color: Color) {
        self.clear = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.vertices
            .extend(rect_quad(rect, color.to_f32(), self.screen_w, self.screen_h));
    }

    fn draw_label(&mut self, label: &Label) {
        // Backing box goes through the GPU so it stays in draw order
        if let Some(bg) = label.background {
            self.draw_rect(label.rect, bg);
        }
        self.labels.push(label.clone());
    }
}
