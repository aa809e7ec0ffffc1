//! Integer screen-space rectangles
//!
//! y grows downward; `right()`/`bottom()` are exclusive edges.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Anchor the bottom-centre point at (x, y)
    pub fn set_midbottom(&mut self, x: i32, y: i32) {
        self.x = x - self.w / 2;
        self.y = y - self.h;
    }

    /// Anchor the top-centre point at (x, y)
    pub fn set_midtop(&mut self, x: i32, y: i32) {
        self.x = x - self.w / 2;
        self.y = y;
    }

    /// Centre this rect on (x, y)
    pub fn set_center(&mut self, x: i32, y: i32) {
        self.x = x - self.w / 2;
        self.y = y - self.h / 2;
    }

    /// Overlap test; touching edges do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Point containment (left/top inclusive, right/bottom exclusive)
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when `other` lies entirely inside this rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Anything with a collision rectangle
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Something that can be clicked
pub trait HitTest {
    fn hit_test(&self, x: i32, y: i32) -> bool;
}

impl HitTest for Rect {
    fn hit_test(&self, x: i32, y: i32) -> bool {
        self.contains_point(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap_and_touching() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        // Shared edge is not an overlap
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        // Containment counts
        assert!(a.intersects(&Rect::new(2, 2, 2, 2)));
    }

    #[test]
    fn test_anchors() {
        let mut r = Rect::new(0, 0, 60, 48);
        r.set_midbottom(550, 600);
        assert_eq!((r.x, r.y), (520, 552));
        assert_eq!(r.bottom(), 600);
        assert_eq!(r.center_x(), 550);

        let mut b = Rect::new(0, 0, 3, 15);
        b.set_midtop(550, 552);
        assert_eq!((b.x, b.y), (549, 552));
    }

    #[test]
    fn test_contains_point_edges() {
        let r = Rect::new(450, 275, 200, 50);
        assert!(r.contains_point(450, 275));
        assert!(r.contains_point(649, 324));
        assert!(!r.contains_point(650, 300));
        assert!(!r.contains_point(500, 325));
    }
}
