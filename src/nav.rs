//! Mobile navigation toggle.
//!
//! A two-state machine. [`MobileNav::apply`] computes the transition and
//! whether the DOM must be redrawn; [`MobileNav::render`] writes the state to
//! the hamburger, the menu and the three hamburger bars in one go so they
//! never disagree.

use tracing::debug;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

/// Class toggled on the hamburger and the menu while open.
pub const ACTIVE: &str = "active";

/// Menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Inputs the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    HamburgerClick,
    LinkClick,
    /// Click landing outside both the hamburger and the menu.
    OutsideClick,
    Escape,
}

/// Inline styles for the three hamburger bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarPose {
    pub top_transform: &'static str,
    pub middle_opacity: &'static str,
    pub bottom_transform: &'static str,
}

impl BarPose {
    /// The "X" shape.
    pub const OPEN: BarPose = BarPose {
        top_transform: "rotate(-45deg) translate(-5px, 6px)",
        middle_opacity: "0",
        bottom_transform: "rotate(45deg) translate(-5px, -6px)",
    };

    /// Three flat bars.
    pub const CLOSED: BarPose = BarPose {
        top_transform: "rotate(0) translate(0, 0)",
        middle_opacity: "1",
        bottom_transform: "rotate(0) translate(0, 0)",
    };
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn pose(self) -> BarPose {
        match self {
            MenuState::Open => BarPose::OPEN,
            MenuState::Closed => BarPose::CLOSED,
        }
    }

    /// Next state for `input`.
    pub fn next(self, input: MenuInput) -> MenuState {
        match (self, input) {
            (MenuState::Closed, MenuInput::HamburgerClick) => MenuState::Open,
            (MenuState::Open, MenuInput::HamburgerClick) => MenuState::Closed,
            (_, MenuInput::LinkClick | MenuInput::OutsideClick | MenuInput::Escape) => {
                MenuState::Closed
            }
        }
    }
}

/// The menu's elements and current state.
#[derive(Debug, Clone, Default)]
pub struct MobileNav {
    pub hamburger: Option<NodeId>,
    pub menu: Option<NodeId>,
    /// Bar elements inside the hamburger, top to bottom.
    pub bars: Vec<NodeId>,
    state: MenuState,
}

impl MobileNav {
    pub fn new(hamburger: Option<NodeId>, menu: Option<NodeId>, bars: Vec<NodeId>) -> Self {
        Self {
            hamburger,
            menu,
            bars,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Whether `target` lies inside the hamburger or the menu.
    pub fn contains(&self, dom: &Dom, target: NodeId) -> bool {
        [self.hamburger, self.menu]
            .into_iter()
            .flatten()
            .any(|root| dom.contains_node(root, target))
    }

    /// Feed an input and redraw when needed. Returns the new state.
    ///
    /// Toggles and link clicks always redraw; dismissals only redraw when
    /// they actually close an open menu.
    pub fn apply(&mut self, dom: &mut Dom, input: MenuInput) -> MenuState {
        let from = self.state;
        let to = from.next(input);
        self.state = to;

        let redraw =
            from != to || matches!(input, MenuInput::HamburgerClick | MenuInput::LinkClick);
        if from != to {
            debug!(?from, ?to, ?input, "mobile menu transition");
        }
        if redraw {
            self.render(dom);
        }
        to
    }

    /// Write the current state to the DOM.
    pub fn render(&self, dom: &mut Dom) {
        let open = self.state.is_open();
        for node in [self.hamburger, self.menu].into_iter().flatten() {
            if let Some(data) = dom.get_mut(node) {
                data.set_class(ACTIVE, open);
            }
        }

        let pose = self.state.pose();
        let writes = [
            ("transform", pose.top_transform),
            ("opacity", pose.middle_opacity),
            ("transform", pose.bottom_transform),
        ];
        for (&bar, (property, value)) in self.bars.iter().zip(writes) {
            if let Some(data) = dom.get_mut(bar) {
                data.set_style(property, value);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    fn build() -> (Dom, MobileNav, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let burger = dom.insert_child(body, NodeData::new("div").with_class("hamburger"));
        let bars = (0..3)
            .map(|_| dom.insert_child(burger, NodeData::new("span")))
            .collect();
        let menu = dom.insert_child(body, NodeData::new("ul").with_class("nav-menu"));
        let main = dom.insert_child(body, NodeData::new("main"));
        (dom, MobileNav::new(Some(burger), Some(menu), bars), main)
    }

    fn is_active(dom: &Dom, node: Option<NodeId>) -> bool {
        node.and_then(|n| dom.get(n)).is_some_and(|d| d.has_class(ACTIVE))
    }

    // ── Transitions ──────────────────────────────────────────────────

    #[test]
    fn transition_table() {
        use MenuInput::*;
        use MenuState::*;
        assert_eq!(Closed.next(HamburgerClick), Open);
        assert_eq!(Open.next(HamburgerClick), Closed);
        for input in [LinkClick, OutsideClick, Escape] {
            assert_eq!(Open.next(input), Closed);
            assert_eq!(Closed.next(input), Closed);
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn open_renders_x_pose() {
        let (mut dom, mut nav, _) = build();
        assert_eq!(nav.apply(&mut dom, MenuInput::HamburgerClick), MenuState::Open);
        assert!(is_active(&dom, nav.hamburger));
        assert!(is_active(&dom, nav.menu));

        let bar = |i: usize, prop: &str| {
            dom.get(nav.bars[i])
                .and_then(|d| d.style(prop))
                .map(str::to_string)
        };
        assert_eq!(bar(0, "transform").as_deref(), Some("rotate(-45deg) translate(-5px, 6px)"));
        assert_eq!(bar(1, "opacity").as_deref(), Some("0"));
        assert_eq!(bar(2, "transform").as_deref(), Some("rotate(45deg) translate(-5px, -6px)"));
    }

    #[test]
    fn close_resets_pose() {
        let (mut dom, mut nav, _) = build();
        nav.apply(&mut dom, MenuInput::HamburgerClick);
        nav.apply(&mut dom, MenuInput::Escape);
        assert_eq!(nav.state(), MenuState::Closed);
        assert!(!is_active(&dom, nav.hamburger));
        assert!(!is_active(&dom, nav.menu));
        assert_eq!(dom.get(nav.bars[1]).unwrap().style("opacity"), Some("1"));
        assert_eq!(
            dom.get(nav.bars[0]).unwrap().style("transform"),
            Some("rotate(0) translate(0, 0)")
        );
    }

    #[test]
    fn dismissal_while_closed_writes_nothing() {
        let (mut dom, mut nav, _) = build();
        nav.apply(&mut dom, MenuInput::OutsideClick);
        nav.apply(&mut dom, MenuInput::Escape);
        assert!(dom.get(nav.bars[1]).unwrap().style("opacity").is_none());
    }

    #[test]
    fn link_click_while_closed_still_resets_bars() {
        let (mut dom, mut nav, _) = build();
        nav.apply(&mut dom, MenuInput::LinkClick);
        assert_eq!(dom.get(nav.bars[1]).unwrap().style("opacity"), Some("1"));
    }

    #[test]
    fn fewer_bars_is_fine() {
        let (mut dom, mut nav, _) = build();
        nav.bars.truncate(1);
        nav.apply(&mut dom, MenuInput::HamburgerClick);
        assert_eq!(
            dom.get(nav.bars[0]).unwrap().style("transform"),
            Some("rotate(-45deg) translate(-5px, 6px)")
        );
    }

    #[test]
    fn containment() {
        let (dom, nav, main) = build();
        assert!(nav.contains(&dom, nav.bars[2]));
        assert!(nav.contains(&dom, nav.menu.unwrap()));
        assert!(!nav.contains(&dom, main));
    }

    #[test]
    fn missing_elements_are_tolerated() {
        let (mut dom, _, _) = build();
        let mut nav = MobileNav::default();
        assert_eq!(nav.apply(&mut dom, MenuInput::HamburgerClick), MenuState::Open);
    }
}
