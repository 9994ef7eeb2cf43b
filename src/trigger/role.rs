//! Animation roles and role detection.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::css::matching::matches_any;
use crate::css::model::SelectorList;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Set of animation roles carried by a watched element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Roles(pub u8);

impl Roles {
    pub const NONE: Roles = Roles(0);
    /// Gains `visible`.
    pub const REVEAL: Roles = Roles(1);
    /// Reveals its `.stagger-item` descendants one after another.
    pub const STAGGER: Roles = Roles(1 << 1);
    /// Gains `animate`.
    pub const IMAGE_REVEAL: Roles = Roles(1 << 2);
    /// Counts its text up to `data-count`.
    pub const COUNTER: Roles = Roles(1 << 3);
    /// Widens to `data-percentage`.
    pub const PROGRESS: Roles = Roles(1 << 4);
    /// Types its text back in.
    pub const TYPEWRITER: Roles = Roles(1 << 5);
    /// Gains `animate-in`.
    pub const ANIMATE_IN: Roles = Roles(1 << 6);

    const NAMES: [(Roles, &'static str); 7] = [
        (Roles::REVEAL, "reveal"),
        (Roles::STAGGER, "stagger"),
        (Roles::IMAGE_REVEAL, "image-reveal"),
        (Roles::COUNTER, "counter"),
        (Roles::PROGRESS, "progress"),
        (Roles::TYPEWRITER, "typewriter"),
        (Roles::ANIMATE_IN, "animate-in"),
    ];

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Roles) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the set roles, in effect order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(role, _)| self.contains(*role))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Roles {
    type Output = Roles;
    fn bitor(self, rhs: Self) -> Self::Output {
        Roles(self.0 | rhs.0)
    }
}

impl BitOrAssign for Roles {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Roles({})", self.names().join(" | "))
    }
}

// ---------------------------------------------------------------------------
// RoleSelectors
// ---------------------------------------------------------------------------

/// Compiled selectors deciding which roles an element carries.
#[derive(Debug, Clone, Default)]
pub struct RoleSelectors {
    pub reveal: SelectorList,
    pub stagger: SelectorList,
    pub image_reveal: SelectorList,
    pub counter: SelectorList,
    pub progress: SelectorList,
    pub typewriter: SelectorList,
    pub animate_in: SelectorList,
}

impl RoleSelectors {
    fn table(&self) -> [(&SelectorList, Roles); 7] {
        [
            (&self.reveal, Roles::REVEAL),
            (&self.stagger, Roles::STAGGER),
            (&self.image_reveal, Roles::IMAGE_REVEAL),
            (&self.counter, Roles::COUNTER),
            (&self.progress, Roles::PROGRESS),
            (&self.typewriter, Roles::TYPEWRITER),
            (&self.animate_in, Roles::ANIMATE_IN),
        ]
    }

    /// Roles carried by `node`.
    pub fn roles_of(&self, dom: &Dom, node: NodeId) -> Roles {
        self.table()
            .into_iter()
            .filter(|(list, _)| matches_any(list, node, dom))
            .fold(Roles::NONE, |acc, (_, role)| acc | role)
    }

    /// Every attached element with at least one role, in document order.
    pub fn detect(&self, dom: &Dom) -> Vec<(NodeId, Roles)> {
        dom.document_order()
            .into_iter()
            .map(|node| (node, self.roles_of(dom, node)))
            .filter(|(_, roles)| !roles.is_empty())
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_selector_list;
    use crate::dom::node::NodeData;

    fn stock() -> RoleSelectors {
        let p = |s: &str| parse_selector_list(s).unwrap();
        RoleSelectors {
            reveal: p(".animate-on-scroll, .stagger-container, .image-reveal"),
            stagger: p(".stagger-container"),
            image_reveal: p(".image-reveal"),
            counter: p(".counter"),
            progress: p(".progress-fill"),
            typewriter: p(".typewriter"),
            animate_in: p(".project-card, .about-text, .contact-content"),
        }
    }

    // ── Bitmask ──────────────────────────────────────────────────────

    #[test]
    fn bit_ops() {
        let roles = Roles::REVEAL | Roles::STAGGER;
        assert!(roles.contains(Roles::REVEAL));
        assert!(roles.contains(Roles::STAGGER));
        assert!(!roles.contains(Roles::COUNTER));
        assert!(Roles::NONE.is_empty());

        let mut more = Roles::NONE;
        more |= Roles::COUNTER;
        assert_eq!(more, Roles::COUNTER);
    }

    #[test]
    fn debug_lists_names() {
        let roles = Roles::REVEAL | Roles::IMAGE_REVEAL;
        assert_eq!(format!("{roles:?}"), "Roles(reveal | image-reveal)");
    }

    // ── Detection ────────────────────────────────────────────────────

    #[test]
    fn class_table() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let plain = dom.insert_child(body, NodeData::new("div").with_class("animate-on-scroll"));
        let stagger = dom.insert_child(body, NodeData::new("ul").with_class("stagger-container"));
        let image = dom.insert_child(body, NodeData::new("img").with_class("image-reveal"));
        let counter = dom.insert_child(body, NodeData::new("span").with_class("counter"));
        let progress = dom.insert_child(body, NodeData::new("div").with_class("progress-fill"));
        let typewriter = dom.insert_child(body, NodeData::new("h1").with_class("typewriter"));
        let card = dom.insert_child(body, NodeData::new("article").with_class("project-card"));
        let sel = stock();

        assert_eq!(sel.roles_of(&dom, plain), Roles::REVEAL);
        assert_eq!(sel.roles_of(&dom, stagger), Roles::REVEAL | Roles::STAGGER);
        assert_eq!(sel.roles_of(&dom, image), Roles::REVEAL | Roles::IMAGE_REVEAL);
        assert_eq!(sel.roles_of(&dom, counter), Roles::COUNTER);
        assert_eq!(sel.roles_of(&dom, progress), Roles::PROGRESS);
        assert_eq!(sel.roles_of(&dom, typewriter), Roles::TYPEWRITER);
        assert_eq!(sel.roles_of(&dom, card), Roles::ANIMATE_IN);
        assert!(sel.roles_of(&dom, body).is_empty());
    }

    #[test]
    fn combined_classes_merge_roles() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let both = dom.insert_child(
            body,
            NodeData::new("span").with_classes(["animate-on-scroll", "counter"]),
        );
        assert_eq!(stock().roles_of(&dom, both), Roles::REVEAL | Roles::COUNTER);
    }

    #[test]
    fn detect_is_document_order() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let section = dom.insert_child(body, NodeData::new("section"));
        let a = dom.insert_child(section, NodeData::new("span").with_class("counter"));
        let b = dom.insert_child(body, NodeData::new("div").with_class("animate-on-scroll"));
        let found: Vec<_> = stock().detect(&dom).into_iter().map(|(n, _)| n).collect();
        assert_eq!(found, vec![a, b]);
    }
}
