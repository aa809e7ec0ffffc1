//! Score display
//!
//! Labels are laid out only when the score they show changes, never per
//! frame, since rasterizing text is the expensive part of drawing them.

use crate::consts::{SCORE_FONT_SIZE, SCORE_MARGIN, SCORE_TEXT_COLOR};
use crate::platform::{Color, TextMetrics};
use crate::sim::Rect;
use crate::stats::GameStats;

/// A positioned piece of text ready for the platform to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: u32,
    pub color: Color,
    /// Solid background behind the glyphs, if any
    pub background: Option<Color>,
    pub rect: Rect,
}

/// Round down to a multiple of ten and group thousands: 1234567 → "1,234,560"
pub fn format_score(score: u64) -> String {
    let rounded = score - score % 10;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone)]
pub struct Scoreboard {
    screen: Rect,
    background: Color,
    /// Current score, top right
    pub score: Label,
    /// Best score this process, top centre
    pub high_score: Label,
    /// Number of times labels were rebuilt
    pub preps: u32,
}

impl Scoreboard {
    pub fn new(screen: Rect, background: Color, stats: &GameStats, metrics: &dyn TextMetrics) -> Self {
        let blank = Label {
            text: String::new(),
            font_size: SCORE_FONT_SIZE,
            color: SCORE_TEXT_COLOR,
            background: Some(background),
            rect: Rect::default(),
        };
        let mut board = Self {
            screen,
            background,
            score: blank.clone(),
            high_score: blank,
            preps: 0,
        };
        board.prep_score(stats, metrics);
        board.prep_high_score(stats, metrics);
        board
    }

    /// Rebuild the score label, right-aligned at the top right
    pub fn prep_score(&mut self, stats: &GameStats, metrics: &dyn TextMetrics) {
        let text = format_score(stats.score);
        let (w, h) = metrics.measure(&text, SCORE_FONT_SIZE);
        let rect = Rect::new(self.screen.right() - SCORE_MARGIN - w, SCORE_MARGIN, w, h);
        self.score = self.label(text, rect);
        self.preps += 1;
    }

    /// Rebuild the high-score label, centred at the top
    pub fn prep_high_score(&mut self, stats: &GameStats, metrics: &dyn TextMetrics) {
        let text = format_score(stats.high_score);
        let (w, h) = metrics.measure(&text, SCORE_FONT_SIZE);
        let mut rect = Rect::new(0, SCORE_MARGIN, w, h);
        rect.x = self.screen.center_x() - w / 2;
        self.high_score = self.label(text, rect);
        self.preps += 1;
    }

    fn label(&self, text: String, rect: Rect) -> Label {
        Label {
            text,
            font_size: SCORE_FONT_SIZE,
            color: SCORE_TEXT_COLOR,
            background: Some(self.background),
            rect,
        }
    }

    /// Labels in draw order
    pub fn labels(&self) -> [&Label; 2] {
        [&self.score, &self.high_score]
    }
}
