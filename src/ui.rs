//! On-screen controls

use crate::consts::{BUTTON_COLOR, BUTTON_FONT_SIZE, BUTTON_HEIGHT, BUTTON_TEXT_COLOR, BUTTON_WIDTH};
use crate::platform::{Canvas, Color, TextMetrics};
use crate::scoreboard::Label;
use crate::sim::{HitTest, Rect};

/// A clickable button. Owns only its bounds and label.
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub color: Color,
    pub label: Label,
}

impl Button {
    /// Button centred on `screen` with `text` centred inside it
    pub fn new(screen: Rect, text: &str, metrics: &dyn TextMetrics) -> Self {
        let mut rect = Rect::new(0, 0, BUTTON_WIDTH, BUTTON_HEIGHT);
        rect.set_center(screen.center_x(), screen.center_y());

        let (w, h) = metrics.measure(text, BUTTON_FONT_SIZE);
        let mut label_rect = Rect::new(0, 0, w, h);
        label_rect.set_center(rect.center_x(), rect.center_y());

        Self {
            rect,
            color: BUTTON_COLOR,
            label: Label {
                text: text.to_string(),
                font_size: BUTTON_FONT_SIZE,
                color: BUTTON_TEXT_COLOR,
                background: Some(BUTTON_COLOR),
                rect: label_rect,
            },
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_rect(self.rect, self.color);
        canvas.draw_label(&self.label);
    }
}

impl HitTest for Button {
    fn hit_test(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(x, y)
    }
}
