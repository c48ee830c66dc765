//! Text buttons
//!
//! Buttons are plain text with a hit rect approximated from the label
//! extent. Hover state is driven by pointer-move events and only changes
//! the draw color.

use crate::render::{Color, DrawOp};
use crate::sim::Rect;

#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub font_px: i32,
    pub hovered: bool,
}

impl Button {
    /// Place a button by its text center. Glyph width is assumed at 60% of
    /// the font size, close enough for a hit box.
    pub fn new(label: &str, center_x: i32, center_y: i32, font_px: i32) -> Self {
        let w = (label.chars().count() as i32 * font_px * 6) / 10;
        let h = font_px + font_px / 4;
        Self {
            label: label.to_string(),
            rect: Rect::from_center(center_x, center_y, w.max(1), h),
            font_px,
            hovered: false,
        }
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.hovered = self.rect.contains_point(x, y);
    }

    pub fn hit(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(x, y)
    }

    pub fn draw_op(&self) -> DrawOp {
        DrawOp::Text {
            text: self.label.clone(),
            center_x: self.rect.center_x(),
            center_y: self.rect.center_y(),
            size_px: self.font_px,
            color: if self.hovered { Color::HOVER } else { Color::WHITE },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_follows_pointer() {
        let mut btn = Button::new("START", 400, 300, 40);
        btn.pointer_move(400, 300);
        assert!(btn.hovered);
        btn.pointer_move(0, 0);
        assert!(!btn.hovered);
    }

    #[test]
    fn test_hit_edges() {
        let btn = Button::new("QUIT", 200, 100, 32);
        assert!(btn.hit(btn.rect.x, btn.rect.y));
        assert!(!btn.hit(btn.rect.right() + 1, btn.rect.y));
    }

    #[test]
    fn test_hover_changes_color() {
        let mut btn = Button::new("START", 400, 300, 40);
        assert!(matches!(btn.draw_op(), DrawOp::Text { color: Color::WHITE, .. }));
        btn.pointer_move(400, 300);
        assert!(matches!(btn.draw_op(), DrawOp::Text { color: Color::HOVER, .. }));
    }
}
