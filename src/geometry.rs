//! Document geometry: Rect, Insets, Viewport.
//!
//! All coordinates are CSS pixels in document space (origin at the top-left of
//! the page, `y` growing downward). A node's layout box and the scrolled
//! viewport share this space, which keeps intersection tests a plain rectangle
//! overlap.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned box in document coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The empty rect at the origin.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A full-width block of the given height starting at document offset `top`.
    #[inline]
    pub const fn block(top: f64, height: f64) -> Self {
        Self::new(0.0, top, 0.0, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square pixels. Negative extents count as zero.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rect outward by `insets`. Negative insets shrink it.
    ///
    /// This mirrors how a root margin adjusts the observation box.
    pub fn expand(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x - insets.left,
            self.y - insets.top,
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    /// Height of the vertical overlap between two rects, ignoring the
    /// horizontal axis.
    ///
    /// Edge-adjacent rects overlap by `0.0`; disjoint rects return `None`.
    /// Hosts often report blocks without a width and the page only scrolls
    /// vertically, so this is the overlap the visibility trigger uses.
    pub fn vertical_overlap(&self, other: &Rect) -> Option<f64> {
        let y0 = self.y.max(other.y);
        let y1 = self.bottom().min(other.bottom());
        if y1 < y0 {
            None
        } else {
            Some(y1 - y0)
        }
    }
}

// ---------------------------------------------------------------------------
// Insets
// ---------------------------------------------------------------------------

/// Per-edge offsets, as used by a root margin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// No offset on any edge.
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    /// Create insets in CSS shorthand order: top, right, bottom, left.
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Only a bottom offset.
    #[inline]
    pub const fn bottom(bottom: f64) -> Self {
        Self::new(0.0, 0.0, bottom, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The visible window onto the document.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll offset.
    pub scroll_x: f64,
    /// Vertical scroll offset (`scrollY` / `pageYOffset`).
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport of the given size scrolled to the top.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Set the vertical scroll offset (builder).
    pub fn scrolled_to(mut self, y: f64) -> Self {
        self.scroll_y = y;
        self
    }

    /// The visible region in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Format a number the way a JS template literal would print it.
///
/// Integral values drop the fraction and negative zero prints as `0`.
pub(crate) fn css_number(value: f64) -> String {
    let value = value + 0.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_and_area() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn negative_extent_has_no_area() {
        assert_eq!(Rect::new(0.0, 0.0, -5.0, 10.0).area(), 0.0);
    }

    #[test]
    fn expand_with_negative_bottom_shrinks() {
        let r = Rect::new(0.0, 0.0, 100.0, 800.0).expand(Insets::bottom(-50.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 750.0));
    }

    #[test]
    fn expand_all_edges() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0).expand(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(r, Rect::new(6.0, 9.0, 16.0, 14.0));
    }

    #[test]
    fn vertical_overlap_ignores_width() {
        let viewport = Rect::new(0.0, 300.0, 1280.0, 750.0);
        let block = Rect::block(1000.0, 200.0);
        assert_eq!(viewport.vertical_overlap(&block), Some(50.0));
        assert_eq!(viewport.vertical_overlap(&Rect::block(2000.0, 10.0)), None);
    }

    #[test]
    fn viewport_rect_tracks_scroll() {
        let vp = Viewport::new(1280.0, 800.0).scrolled_to(450.0);
        assert_eq!(vp.rect(), Rect::new(0.0, 450.0, 1280.0, 800.0));
    }

    #[test]
    fn css_number_formatting() {
        assert_eq!(css_number(75.0), "75");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(-62.5), "-62.5");
        assert_eq!(css_number(0.25), "0.25");
    }
}
