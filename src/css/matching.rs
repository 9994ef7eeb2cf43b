//! Selector matching against the page DOM.
//!
//! Matching walks the selector right to left. Descendant combinators backtrack
//! over every matching ancestor so mixed chains like `.menu > li a` resolve
//! the way browsers do.

use crate::css::model::{
    Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList, SelectorPart,
};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Whether any selector in the group matches `node_id`.
pub fn matches_any(selectors: &SelectorList, node_id: NodeId, dom: &Dom) -> bool {
    selectors
        .selectors
        .iter()
        .any(|sel| matches_selector(sel, node_id, dom))
}

/// Whether a complex selector matches `node_id`.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    match selector.parts.last() {
        Some(SelectorPart::Compound(_)) => {
            match_at(&selector.parts, selector.parts.len() - 1, node_id, dom)
        }
        _ => false,
    }
}

/// Match `parts[..=idx]` with `parts[idx]` (a compound) anchored on `node_id`.
fn match_at(parts: &[SelectorPart], idx: usize, node_id: NodeId, dom: &Dom) -> bool {
    let SelectorPart::Compound(compound) = &parts[idx] else {
        return false;
    };
    let Some(node) = dom.get(node_id) else {
        return false;
    };
    if !matches_compound(compound, node) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    // Need a combinator followed (leftward) by another compound.
    if idx < 2 {
        return false;
    }
    let SelectorPart::Combinator(combinator) = &parts[idx - 1] else {
        return false;
    };

    match combinator {
        Combinator::Child => dom
            .parent(node_id)
            .is_some_and(|parent| match_at(parts, idx - 2, parent, dom)),
        Combinator::Descendant => dom
            .ancestors(node_id)
            .into_iter()
            .any(|ancestor| match_at(parts, idx - 2, ancestor, dom)),
    }
}

/// Check whether a compound selector matches a single node's data.
pub fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag == *name,
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::Attribute(attr) => attr.matches(node.attr(&attr.name)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_selector_list;
    use crate::dom::node::NodeData;

    /// Build a test tree:
    /// ```text
    ///        body
    ///         |
    ///       nav.menu
    ///         |
    ///        ul
    ///       /   \
    ///     li     li.special
    ///     |         |
    ///    a#x       div
    ///               |
    ///              a#y
    /// ```
    fn build_test_dom() -> (Dom, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let nav = dom.insert_child(body, NodeData::new("nav").with_class("menu"));
        let ul = dom.insert_child(nav, NodeData::new("ul"));
        let li1 = dom.insert_child(ul, NodeData::new("li"));
        let li2 = dom.insert_child(ul, NodeData::new("li").with_class("special"));
        let x = dom.insert_child(li1, NodeData::new("a").with_id("x").with_href("#top"));
        let div = dom.insert_child(li2, NodeData::new("div"));
        let y = dom.insert_child(div, NodeData::new("a").with_id("y").with_href("/cv.pdf"));
        (dom, x, y)
    }

    fn matches(sel: &str, node: NodeId, dom: &Dom) -> bool {
        matches_any(&parse_selector_list(sel).unwrap(), node, dom)
    }

    #[test]
    fn match_type_class_id() {
        let (dom, x, _) = build_test_dom();
        assert!(matches("a", x, &dom));
        assert!(matches("#x", x, &dom));
        assert!(matches("a#x", x, &dom));
        assert!(!matches("a.menu", x, &dom));
        assert!(matches("*", x, &dom));
    }

    #[test]
    fn match_descendant() {
        let (dom, x, y) = build_test_dom();
        assert!(matches(".menu a", x, &dom));
        assert!(matches(".menu li a", y, &dom));
        assert!(!matches("section a", x, &dom));
    }

    #[test]
    fn match_child() {
        let (dom, x, y) = build_test_dom();
        assert!(matches("li > a", x, &dom));
        assert!(!matches("li > a", y, &dom));
        assert!(matches("li > div > a", y, &dom));
    }

    #[test]
    fn match_mixed_chain_backtracks() {
        let (dom, _x, y) = build_test_dom();
        // The nearest `li` ancestor of `y` is `li.special`; the child test
        // against `ul` must still succeed through it.
        assert!(matches("ul > li div a", y, &dom));
        assert!(matches("nav ul > li.special a", y, &dom));
        assert!(!matches("nav > li a", y, &dom));
    }

    #[test]
    fn match_attribute() {
        let (dom, x, y) = build_test_dom();
        assert!(matches(r##"a[href^="#"]"##, x, &dom));
        assert!(!matches(r##"a[href^="#"]"##, y, &dom));
        assert!(matches("a[href$='.pdf']", y, &dom));
        assert!(matches("[id=y]", y, &dom));
    }

    #[test]
    fn match_group() {
        let (dom, x, y) = build_test_dom();
        assert!(matches("#nope, #x", x, &dom));
        assert!(!matches("#nope, #x", y, &dom));
    }

    #[test]
    fn stale_node_never_matches() {
        let (mut dom, x, _) = build_test_dom();
        dom.remove(x);
        assert!(!matches("a", x, &dom));
    }
}
