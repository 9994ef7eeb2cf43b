//! DOM queries: by id, class, tag, selector; generic predicate matching.
//!
//! Every query returns nodes in document order and only considers nodes
//! attached to the root, like `document.querySelectorAll`.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::css::matching::matches_any;
use crate::css::model::SelectorList;

impl Dom {
    /// Find the first node whose `id` matches (`getElementById`).
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_document()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes that have the given CSS class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all nodes with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.query_all(|data| data.tag == tag)
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_document()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// All attached nodes matching any selector in `selectors`.
    pub fn select(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&id| matches_any(selectors, id, self))
            .collect()
    }

    /// First attached node matching `selectors`.
    pub fn select_first(&self, selectors: &SelectorList) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&id| matches_any(selectors, id, self))
    }

    /// Nodes inside `scope` (excluding `scope`) matching `selectors`
    /// (`element.querySelectorAll`).
    pub fn select_within(&self, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| matches_any(selectors, id, self))
            .collect()
    }

    /// Iterate attached `(NodeId, &NodeData)` pairs in document order.
    fn iter_document(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.document_order()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
