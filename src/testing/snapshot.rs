//! Text dumps of the DOM for snapshot assertions.
//!
//! Each node prints on its own line, indented two spaces per depth:
//!
//! ```text
//! tag#id.class1.class2 "text" {property: value; property: value}
//! ```
//!
//! The text and style parts are omitted when empty. Layout rects, data
//! attributes and other attributes are left out; they do not change at
//! runtime.

use std::fmt::Write as _;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Dump the whole document.
pub fn dump_dom(dom: &Dom) -> String {
    match dom.root() {
        Some(root) => dump_subtree(dom, root),
        None => String::new(),
    }
}

/// Dump `node` and its descendants. Lines are joined with `'\n'` and the
/// output has no trailing newline.
pub fn dump_subtree(dom: &Dom, node: NodeId) -> String {
    let mut lines = Vec::new();
    collect(dom, node, 0, &mut lines);
    lines.join("\n")
}

fn collect(dom: &Dom, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(node) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(data)));
    for &child in dom.children(node) {
        collect(dom, child, depth + 1, lines);
    }
}

/// One-line description of a node.
pub fn describe(data: &NodeData) -> String {
    let mut out = data.tag.clone();
    if let Some(id) = &data.id {
        let _ = write!(out, "#{id}");
    }
    for class in &data.classes {
        let _ = write!(out, ".{class}");
    }
    if !data.text.is_empty() {
        let _ = write!(out, " {:?}", data.text);
    }
    if !data.style.is_empty() {
        let declarations: Vec<String> = data
            .style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect();
        let _ = write!(out, " {{{}}}", declarations.join("; "));
    }
    out
}
