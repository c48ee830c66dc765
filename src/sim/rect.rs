//! Integer axis-aligned rectangles
//!
//! Pixel-rect semantics: `x`/`y` are the top-left corner, `right`/`bottom`
//! are exclusive edges.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self {
            x: cx - w / 2,
            y: cy - h / 2,
            w,
            h,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Axis-aligned overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow the width by `amount` on both ends combined, keeping the center
    pub fn inflate_x(&self, amount: i32) -> Rect {
        Rect {
            x: self.x - amount / 2,
            y: self.y,
            w: self.w + amount,
            h: self.h,
        }
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10))); // edge touch
        assert!(!a.intersects(&Rect::new(0, 20, 10, 10)));
    }

    #[test]
    fn test_inflate_x_keeps_center() {
        let a = Rect::new(10, 10, 20, 20);
        let b = a.inflate_x(20);
        assert_eq!(b.center_x(), a.center_x());
        assert_eq!(b.w, 40);
        assert_eq!(b.h, a.h);
    }

    #[test]
    fn test_inflated_overlap_catches_near_miss() {
        // Two rects 15px apart overlap once one is inflated by 20px
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(25, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.inflate_x(40).intersects(&b));
    }

    #[test]
    fn test_contains_point() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.contains_point(0, 0));
        assert!(a.contains_point(9, 9));
        assert!(!a.contains_point(10, 10));
    }
}
