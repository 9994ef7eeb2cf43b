//! Scroll-position reactors.
//!
//! Pure functions of the scroll offset (plus the previous offset, kept by
//! [`ScrollTracker`]). The page re-evaluates them on every scroll event and
//! writes the results into the DOM.

use tracing::warn;

use crate::geometry::css_number;

// ---------------------------------------------------------------------------
// Nav visibility
// ---------------------------------------------------------------------------

/// Whether the nav bar slides out of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavVisibility {
    Shown,
    Hidden,
}

impl NavVisibility {
    /// Inline `transform` for this state.
    pub fn transform(self) -> &'static str {
        match self {
            NavVisibility::Shown => "translateY(0)",
            NavVisibility::Hidden => "translateY(-100%)",
        }
    }
}

/// Remembers the previous scroll offset to tell scroll direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    last_y: f64,
}

impl ScrollTracker {
    /// Start tracking from the offset the page loaded at.
    pub fn new(initial_y: f64) -> Self {
        Self { last_y: initial_y }
    }

    /// The offset seen by the previous call to [`observe`](Self::observe).
    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    /// Record offset `y` and decide the nav state: hidden while scrolling
    /// down past `hide_after`, shown otherwise.
    pub fn observe(&mut self, y: f64, hide_after: f64) -> NavVisibility {
        let hidden = y > self.last_y && y > hide_after;
        self.last_y = y;
        if hidden {
            NavVisibility::Hidden
        } else {
            NavVisibility::Shown
        }
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Whether the page is scrolled far enough for the compact nav.
pub fn is_scrolled(y: f64, threshold: f64) -> bool {
    y > threshold
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Inline header background and shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl HeaderStyle {
    /// Near the top of the page.
    pub const RESTING: HeaderStyle = HeaderStyle {
        background: "rgba(255, 255, 255, 0.95)",
        box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
    };

    /// Once the page has scrolled.
    pub const RAISED: HeaderStyle = HeaderStyle {
        background: "rgba(255, 255, 255, 0.98)",
        box_shadow: "0 2px 30px rgba(0, 0, 0, 0.15)",
    };

    pub fn for_offset(y: f64, threshold: f64) -> HeaderStyle {
        if is_scrolled(y, threshold) {
            Self::RAISED
        } else {
            Self::RESTING
        }
    }
}

// ---------------------------------------------------------------------------
// Active section
// ---------------------------------------------------------------------------

/// Id of the section the reader is in.
///
/// `sections` yields `(id, top)` in document order. The current section is
/// the last one whose `top - lead` is at or above `y`. Returns `None` when no
/// section qualifies or the qualifying section has no id.
pub fn current_section<'a>(
    sections: impl IntoIterator<Item = (Option<&'a str>, f64)>,
    y: f64,
    lead: f64,
) -> Option<&'a str> {
    sections
        .into_iter()
        .filter(|&(_, top)| y >= top - lead)
        .last()
        .and_then(|(id, _)| id)
}

/// Whether a nav link with `href` points at section `current`.
pub fn is_active_link(href: Option<&str>, current: Option<&str>) -> bool {
    match (href.and_then(|h| h.strip_prefix('#')), current) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Parallax
// ---------------------------------------------------------------------------

/// Inline `transform` for a parallax element at scroll offset `y`.
pub fn parallax_transform(y: f64, rate: f64) -> String {
    format!("translateY({}px)", css_number(y * rate))
}

/// Parse `data-rate`, falling back on missing or malformed values.
pub fn parse_rate(raw: Option<&str>, fallback: f64) -> f64 {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return fallback;
    };
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() => rate,
        _ => {
            warn!(value = raw, fallback, "malformed data-rate, using fallback");
            fallback
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Nav ──────────────────────────────────────────────────────────

    #[test]
    fn nav_hides_only_when_scrolling_down_past_limit() {
        let mut tracker = ScrollTracker::new(0.0);
        assert_eq!(tracker.observe(400.0, 500.0), NavVisibility::Shown);
        assert_eq!(tracker.observe(600.0, 500.0), NavVisibility::Hidden);
        assert_eq!(tracker.observe(700.0, 500.0), NavVisibility::Hidden);
        assert_eq!(tracker.observe(650.0, 500.0), NavVisibility::Shown);
        assert_eq!(tracker.observe(650.0, 500.0), NavVisibility::Shown);
        assert_eq!(tracker.last_y(), 650.0);
    }

    #[test]
    fn nav_transforms() {
        assert_eq!(NavVisibility::Shown.transform(), "translateY(0)");
        assert_eq!(NavVisibility::Hidden.transform(), "translateY(-100%)");
    }

    #[test]
    fn scrolled_threshold_is_exclusive() {
        assert!(!is_scrolled(100.0, 100.0));
        assert!(is_scrolled(100.5, 100.0));
        assert_eq!(HeaderStyle::for_offset(50.0, 100.0), HeaderStyle::RESTING);
        assert_eq!(HeaderStyle::for_offset(150.0, 100.0), HeaderStyle::RAISED);
    }

    // ── Sections ─────────────────────────────────────────────────────

    #[test]
    fn current_section_uses_lead() {
        let sections = [(Some("home"), 0.0), (Some("about"), 800.0), (Some("work"), 1600.0)];
        assert_eq!(current_section(sections, 850.0, 200.0), Some("about"));
        assert_eq!(current_section(sections, 599.0, 200.0), Some("home"));
        assert_eq!(current_section(sections, 600.0, 200.0), Some("about"));
        assert_eq!(current_section(sections, 5000.0, 200.0), Some("work"));
    }

    #[test]
    fn current_section_none_cases() {
        assert_eq!(current_section([(Some("a"), 900.0)], 0.0, 200.0), None);
        assert_eq!(current_section([(Some("a"), 0.0), (None, 100.0)], 500.0, 200.0), None);
        assert_eq!(current_section(Vec::new(), 500.0, 200.0), None);
    }

    #[test]
    fn active_link_matching() {
        assert!(is_active_link(Some("#about"), Some("about")));
        assert!(!is_active_link(Some("#about"), Some("work")));
        assert!(!is_active_link(Some("/about"), Some("about")));
        assert!(!is_active_link(Some("#"), None));
        assert!(!is_active_link(None, Some("about")));
    }

    // ── Parallax ─────────────────────────────────────────────────────

    #[test]
    fn parallax_formatting() {
        assert_eq!(parallax_transform(200.0, -0.5), "translateY(-100px)");
        assert_eq!(parallax_transform(0.0, -0.5), "translateY(0px)");
        assert_eq!(parallax_transform(3.0, 0.5), "translateY(1.5px)");
    }

    #[test]
    fn rate_parsing() {
        assert_eq!(parse_rate(Some("0.3"), -0.5), 0.3);
        assert_eq!(parse_rate(Some("0"), -0.5), 0.0);
        assert_eq!(parse_rate(Some(""), -0.5), -0.5);
        assert_eq!(parse_rate(Some("fast"), -0.5), -0.5);
        assert_eq!(parse_rate(None, -0.5), -0.5);
    }
}
