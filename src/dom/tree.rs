//! Tree operations: insert, remove, walk, containment.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The page document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Document order is the pre-order depth-first walk from the root.
#[derive(Debug, Clone)]
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached node (no parent).
    ///
    /// The first detached node inserted becomes the document root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Append a node as the last child of `parent`.
    ///
    /// If `parent` does not exist the node is inserted detached.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
            self.parent.insert(id, parent);
        }
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        removed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `node` is `ancestor` or lies inside its subtree
    /// (`Node.contains` semantics).
    pub fn contains_node(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.nodes.contains_key(ancestor) || !self.nodes.contains_key(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether a node is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.root.is_some_and(|root| self.contains_node(root, id))
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The document root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the arena contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start` (inclusive).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut all = self.walk_depth_first(id);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Every node attached to the root, in document order.
    pub fn document_order(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self.walk_depth_first(root),
            None => Vec::new(),
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       body
    ///      /    \
    ///    nav     main
    ///   / \
    ///  a   b
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let nav = dom.insert_child(body, NodeData::new("nav").with_class("navbar"));
        let main = dom.insert_child(body, NodeData::new("main"));
        let a = dom.insert_child(nav, NodeData::new("a").with_id("a"));
        let b = dom.insert_child(nav, NodeData::new("a").with_id("b"));
        (dom, body, nav, main, a, b)
    }

    #[test]
    fn insert_sets_root() {
        let mut dom = Dom::new();
        let id = dom.insert(NodeData::new("html"));
        let _second = dom.insert(NodeData::new("template"));
        assert_eq!(dom.root(), Some(id));
    }

    #[test]
    fn parent_and_children() {
        let (dom, body, nav, main, a, b) = build_tree();
        assert_eq!(dom.parent(nav), Some(body));
        assert_eq!(dom.parent(a), Some(nav));
        assert_eq!(dom.parent(body), None);
        assert_eq!(dom.children(body), &[nav, main]);
        assert_eq!(dom.children(nav), &[a, b]);
        assert!(dom.children(a).is_empty());
    }

    #[test]
    fn ancestors() {
        let (dom, body, nav, _main, a, _b) = build_tree();
        assert_eq!(dom.ancestors(a), vec![nav, body]);
        assert!(dom.ancestors(body).is_empty());
    }

    #[test]
    fn contains_node_is_inclusive() {
        let (dom, body, nav, main, a, _b) = build_tree();
        assert!(dom.contains_node(nav, nav));
        assert!(dom.contains_node(nav, a));
        assert!(dom.contains_node(body, a));
        assert!(!dom.contains_node(main, a));
        assert!(!dom.contains_node(a, nav));
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, body, nav, main, a, b) = build_tree();
        let removed = dom.remove(nav).unwrap();
        assert_eq!(removed.tag, "nav");
        assert!(!dom.contains(a));
        assert!(!dom.contains(b));
        assert_eq!(dom.children(body), &[main]);
        assert_eq!(dom.len(), 2);
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut dom, body, ..) = build_tree();
        dom.remove(body);
        assert!(dom.is_empty());
        assert_eq!(dom.root(), None);
        assert!(dom.document_order().is_empty());
    }

    #[test]
    fn remove_stale_id() {
        let (mut dom, _body, _nav, main, ..) = build_tree();
        dom.remove(main);
        assert!(dom.remove(main).is_none());
        assert!(!dom.contains_node(main, main));
    }

    #[test]
    fn walk_is_document_order() {
        let (dom, body, nav, main, a, b) = build_tree();
        assert_eq!(dom.walk_depth_first(body), vec![body, nav, a, b, main]);
        assert_eq!(dom.document_order(), vec![body, nav, a, b, main]);
        assert_eq!(dom.descendants(nav), vec![a, b]);
    }

    #[test]
    fn detached_nodes_are_not_attached() {
        let (mut dom, body, _nav, _main, a, _b) = build_tree();
        let floating = dom.insert(NodeData::new("div"));
        assert!(dom.is_attached(a));
        assert!(dom.is_attached(body));
        assert!(!dom.is_attached(floating));
        assert!(!dom.document_order().contains(&floating));
    }
}
