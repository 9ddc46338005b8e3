#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for clip regions and content placement.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The top `rows` rows of this rectangle (clamped to its height).
    #[inline]
    pub const fn take_top(&self, rows: u16) -> Rect {
        let rows = if rows < self.height { rows } else { self.height };
        Rect::new(self.x, self.y, self.width, rows)
    }

    /// The bottom `rows` rows of this rectangle (clamped to its height).
    #[inline]
    pub const fn take_bottom(&self, rows: u16) -> Rect {
        let rows = if rows < self.height { rows } else { self.height };
        Rect::new(self.x, self.bottom() - rows, self.width, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn take_top_clamps_to_height() {
        let rect = Rect::new(2, 3, 10, 5);
        assert_eq!(rect.take_top(2), Rect::new(2, 3, 10, 2));
        assert_eq!(rect.take_top(40), rect);
    }

    #[test]
    fn take_bottom_anchors_to_bottom_edge() {
        let rect = Rect::new(0, 4, 8, 6);
        assert_eq!(rect.take_bottom(2), Rect::new(0, 8, 8, 2));
        assert_eq!(rect.take_bottom(0).height, 0);
        assert!(rect.take_bottom(0).is_empty());
    }
}
