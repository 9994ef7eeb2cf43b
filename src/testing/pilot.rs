//! Pilot: programmatic interaction with a headless [`Page`].
//!
//! The `Pilot` mounts a page and provides methods to simulate user input
//! (scrolling, clicks, key presses, resizes), move the virtual clock, and
//! play host commands back into the page.

use std::time::Duration;

use crate::config::MotionConfig;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::command::HostCommand;
use crate::event::input::{Key, PageEvent};
use crate::geometry::Viewport;
use crate::page::{Dispatch, Page, PageError};

/// Upper bound on timer runs in one [`Pilot::settle`] call.
const SETTLE_LIMIT: usize = 100_000;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A mounted page driven by hand.
///
/// # Examples
///
/// ```
/// use scrollfx::testing::{sample_portfolio, Pilot};
///
/// let fixture = sample_portfolio();
/// let mut pilot = Pilot::mount(fixture.dom).unwrap();
/// pilot.scroll_to(1200.0);
/// pilot.settle();
/// assert!(pilot.node(fixture.counter).unwrap().has_class("animate"));
/// ```
#[derive(Debug)]
pub struct Pilot {
    page: Page,
}

impl Pilot {
    /// Mount `dom` with the default config and a 1280x800 viewport.
    pub fn mount(dom: Dom) -> Result<Self, PageError> {
        Self::mount_with(dom, MotionConfig::default(), Viewport::default())
    }

    /// Mount `dom` with a custom config and viewport.
    pub fn mount_with(
        dom: Dom,
        config: MotionConfig,
        viewport: Viewport,
    ) -> Result<Self, PageError> {
        let mut page = Page::with_config(dom, config)?.with_viewport(viewport);
        page.mount()?;
        Ok(Self { page })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Scroll vertically to `y`.
    pub fn scroll_to(&mut self, y: f64) -> Dispatch {
        let x = self.page.viewport().scroll_x;
        self.page.handle_event(PageEvent::Scroll { x, y })
    }

    /// Scroll through each offset in turn.
    pub fn scroll_through(&mut self, offsets: impl IntoIterator<Item = f64>) {
        for y in offsets {
            self.scroll_to(y);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Dispatch {
        self.page.handle_event(PageEvent::Resize { width, height })
    }

    pub fn click(&mut self, target: NodeId) -> Dispatch {
        self.page.handle_event(PageEvent::Click { target })
    }

    /// Click the element with `id`, if there is one.
    pub fn click_id(&mut self, id: &str) -> Option<Dispatch> {
        let target = self.page.dom().query_by_id(id)?;
        Some(self.click(target))
    }

    pub fn press_key(&mut self, key: Key) -> Dispatch {
        self.page.handle_event(PageEvent::KeyDown(key))
    }

    pub fn idle(&mut self) -> Dispatch {
        self.page.handle_event(PageEvent::Idle)
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Advance the virtual clock. Returns the number of timer runs.
    pub fn advance_ms(&mut self, ms: u64) -> usize {
        self.page.advance(Duration::from_millis(ms))
    }

    /// Run timers until none are pending.
    pub fn settle(&mut self) -> usize {
        let mut runs = 0;
        while let Some(due) = self.page.next_deadline() {
            runs += self.page.advance_to(due);
            if runs >= SETTLE_LIMIT {
                break;
            }
        }
        runs
    }

    /// Drain host commands and apply each `ScrollTo` as an instant scroll.
    pub fn pump_commands(&mut self) -> Vec<HostCommand> {
        let commands = self.page.drain_commands();
        for command in &commands {
            match *command {
                HostCommand::ScrollTo { top, .. } => {
                    self.scroll_to(top);
                }
            }
        }
        commands
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.page.dom().get(id)
    }

    /// Classes of `node`, empty if it is gone.
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.node(node)
            .map(|n| n.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.node(node).map(|n| n.text.as_str()).unwrap_or("")
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|n| n.style(property))
    }

    pub fn into_page(self) -> Page {
        self.page
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::MenuState;
    use crate::testing::fixture::sample_portfolio;

    #[test]
    fn mount_runs_first_intersection_pass() {
        let fx = sample_portfolio();
        let pilot = Pilot::mount(fx.dom).unwrap();
        assert!(pilot.page().triggers().is_fired(fx.typewriter));
        assert!(!pilot.page().triggers().is_fired(fx.counter));
        assert_eq!(pilot.text(fx.typewriter), "");
        assert_eq!(pilot.style(fx.typewriter, "width"), Some("100%"));
    }

    #[test]
    fn settle_runs_everything() {
        let fx = sample_portfolio();
        let mut pilot = Pilot::mount(fx.dom).unwrap();
        pilot.settle();
        assert_eq!(pilot.text(fx.typewriter), "Hi, I'm Phil");
        assert_eq!(pilot.page().pending_tasks(), 0);
    }

    #[test]
    fn click_id_and_keys() {
        let fx = sample_portfolio();
        let mut pilot = Pilot::mount(fx.dom).unwrap();
        assert!(pilot.click_id("missing").is_none());
        pilot.click(fx.hamburger);
        assert_eq!(pilot.page().menu_state(), MenuState::Open);
        pilot.press_key(Key::Escape);
        assert_eq!(pilot.page().menu_state(), MenuState::Closed);
    }

    #[test]
    fn pump_commands_scrolls() {
        let fx = sample_portfolio();
        let mut pilot = Pilot::mount(fx.dom).unwrap();
        pilot.click(fx.cta);
        let commands = pilot.pump_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(pilot.page().viewport().scroll_y, 1530.0);
    }
}
