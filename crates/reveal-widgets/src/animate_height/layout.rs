#![forbid(unsafe_code)]

//! The clip container an [`AnimateHeight`](super::AnimateHeight) renders.
//!
//! The container is a fixed-height window over content laid out at its
//! natural size. Content sits in a measurement wrapper pinned to one edge,
//! so only the window height animates; the content itself never reflows.

use std::ops::Range;

use reveal_core::geometry::Rect;

use super::props::EnterFrom;

/// Whether the container clips content outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overflow {
    Visible,
    Hidden,
}

/// The edge the measurement wrapper is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Top,
    Bottom,
}

impl From<EnterFrom> for Anchor {
    fn from(enter_from: EnterFrom) -> Self {
        match enter_from {
            EnterFrom::Top => Self::Top,
            EnterFrom::Bottom => Self::Bottom,
        }
    }
}

/// How content is placed inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentPlacement {
    /// Ordinary flow layout; the container takes the content's size.
    Flow,
    /// Absolutely positioned in a measurement wrapper pinned to an edge.
    Pinned(Anchor),
}

/// Everything a renderer needs to draw the container for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerLayout {
    /// Container height, or `None` for natural (content-driven) height.
    pub height: Option<f64>,
    pub overflow: Overflow,
    pub content: ContentPlacement,
    /// Decorative content opacity in [0.0, 1.0].
    pub opacity: f64,
    /// Decorative content scale.
    pub scale: f64,
}

impl ContainerLayout {
    /// Unanimated presentation: natural size, unclipped, content in flow.
    #[must_use]
    pub const fn natural() -> Self {
        Self {
            height: None,
            overflow: Overflow::Visible,
            content: ContentPlacement::Flow,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    /// Whether content outside the container bounds is hidden.
    #[inline]
    #[must_use]
    pub fn is_clipped(&self) -> bool {
        self.overflow == Overflow::Hidden
    }

    /// Container height rounded up to whole terminal rows.
    ///
    /// `None` for natural height. A partially revealed row counts as visible.
    #[must_use]
    pub fn height_rows(&self) -> Option<u16> {
        self.height
            .map(|h| h.max(0.0).ceil().min(f64::from(u16::MAX)) as u16)
    }

    /// The region of `area` the container occupies.
    ///
    /// Natural layouts take the whole area; animated ones take their height
    /// from the top of `area`.
    #[must_use]
    pub fn clip_rect(&self, area: Rect) -> Rect {
        match self.height_rows() {
            None => area,
            Some(rows) => area.take_top(rows),
        }
    }

    /// Which rows of content `natural_rows` tall are visible through a
    /// container of `clip_rows`.
    ///
    /// Top-pinned content reveals its first rows; bottom-pinned content
    /// reveals its last rows. Unclipped containers show everything.
    #[must_use]
    pub fn visible_rows(&self, natural_rows: u16, clip_rows: u16) -> Range<u16> {
        if !self.is_clipped() {
            return 0..natural_rows;
        }
        let shown = natural_rows.min(clip_rows);
        match self.content {
            ContentPlacement::Flow | ContentPlacement::Pinned(Anchor::Top) => 0..shown,
            ContentPlacement::Pinned(Anchor::Bottom) => (natural_rows - shown)..natural_rows,
        }
    }

    /// Where content of `natural_rows` lands inside `clip`, in terminal
    /// cells, along with the first content row drawn at that position.
    ///
    /// Returns the on-screen rectangle and the content row offset to start
    /// drawing from.
    #[must_use]
    pub fn content_rect(&self, clip: Rect, natural_rows: u16) -> (Rect, u16) {
        let rows = self.visible_rows(natural_rows, clip.height);
        let height = rows.end - rows.start;
        let rect = match self.content {
            ContentPlacement::Pinned(Anchor::Bottom) if self.is_clipped() => clip.take_bottom(height),
            _ => clip.take_top(height),
        };
        (rect, rows.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animated(height: f64, anchor: Anchor) -> ContainerLayout {
        ContainerLayout {
            height: Some(height),
            overflow: Overflow::Hidden,
            content: ContentPlacement::Pinned(anchor),
            opacity: 1.0,
            scale: 1.0,
        }
    }

    #[test]
    fn natural_layout_is_unclipped_flow() {
        let layout = ContainerLayout::natural();
        assert_eq!(layout.height, None);
        assert!(!layout.is_clipped());
        assert_eq!(layout.content, ContentPlacement::Flow);
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(layout.clip_rect(area), area);
        assert_eq!(layout.visible_rows(6, 0), 0..6);
    }

    #[test]
    fn partial_rows_round_up() {
        assert_eq!(animated(2.1, Anchor::Top).height_rows(), Some(3));
        assert_eq!(animated(0.0, Anchor::Top).height_rows(), Some(0));
        assert_eq!(animated(-5.0, Anchor::Top).height_rows(), Some(0));
    }

    #[test]
    fn clip_rect_takes_height_from_top() {
        let area = Rect::new(4, 2, 30, 12);
        assert_eq!(
            animated(5.0, Anchor::Top).clip_rect(area),
            Rect::new(4, 2, 30, 5)
        );
        assert_eq!(animated(50.0, Anchor::Top).clip_rect(area), area);
    }

    #[test]
    fn top_anchor_reveals_leading_rows() {
        let layout = animated(3.0, Anchor::Top);
        assert_eq!(layout.visible_rows(10, 3), 0..3);
        let (rect, first) = layout.content_rect(Rect::new(0, 5, 8, 3), 10);
        assert_eq!(rect, Rect::new(0, 5, 8, 3));
        assert_eq!(first, 0);
    }

    #[test]
    fn bottom_anchor_reveals_trailing_rows() {
        let layout = animated(3.0, Anchor::Bottom);
        assert_eq!(layout.visible_rows(10, 3), 7..10);
        let (rect, first) = layout.content_rect(Rect::new(0, 5, 8, 3), 10);
        assert_eq!(rect, Rect::new(0, 5, 8, 3));
        assert_eq!(first, 7);
    }

    #[test]
    fn short_content_in_tall_bottom_container_sits_on_bottom_edge() {
        let layout = animated(6.0, Anchor::Bottom);
        let (rect, first) = layout.content_rect(Rect::new(0, 0, 8, 6), 2);
        assert_eq!(rect, Rect::new(0, 4, 8, 2));
        assert_eq!(first, 0);
    }

    #[test]
    fn enter_from_maps_to_anchor() {
        assert_eq!(Anchor::from(EnterFrom::Top), Anchor::Top);
        assert_eq!(Anchor::from(EnterFrom::Bottom), Anchor::Bottom);
    }
}
