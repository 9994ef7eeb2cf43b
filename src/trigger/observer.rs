//! Intersection tests and the fire-once trigger registry.
//!
//! The registry stands in for a set of `IntersectionObserver`s. Each watched
//! element carries its roles and a fired flag. [`TriggerRegistry::collect_due`]
//! flips the flag for every element currently intersecting the (margin
//! adjusted) viewport and stops watching it. A fired element is never
//! reported again, however often it scrolls in and out.

use slotmap::SecondaryMap;

use super::role::Roles;
use crate::config::ObserverConfig;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Rect, Viewport};

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

/// Visible fraction of `target` inside `root`, measured on the vertical axis.
///
/// Returns `None` when the boxes do not touch. A zero-height target that
/// touches the root counts as fully visible.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> Option<f64> {
    let overlap = target.vertical_overlap(root)?;
    if target.height <= 0.0 {
        Some(1.0)
    } else {
        Some(overlap / target.height)
    }
}

/// Whether `target` counts as intersecting `viewport` under `options`.
pub fn is_intersecting(target: &Rect, viewport: &Viewport, options: &ObserverConfig) -> bool {
    let root = viewport.rect().expand(options.root_margin);
    intersection_ratio(target, &root).is_some_and(|ratio| ratio >= options.threshold)
}

// ---------------------------------------------------------------------------
// TriggerRegistry
// ---------------------------------------------------------------------------

/// State of one watched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    pub roles: Roles,
    pub fired: bool,
    /// Text captured at mount (typewriter elements).
    pub payload: Option<String>,
}

/// Watched elements keyed by node, in watch order.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    entries: SecondaryMap<NodeId, WatchEntry>,
    order: Vec<NodeId>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `node`. Watching an already known node merges the
    /// roles; a fired node stays fired. Returns `true` for a new entry.
    pub fn watch(&mut self, node: NodeId, roles: Roles, payload: Option<String>) -> bool {
        if let Some(entry) = self.entries.get_mut(node) {
            entry.roles |= roles;
            if entry.payload.is_none() {
                entry.payload = payload;
            }
            return false;
        }
        let fresh = WatchEntry {
            roles,
            fired: false,
            payload,
        };
        if self.entries.insert(node, fresh).is_none() && self.entries.contains_key(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    /// Forget a node entirely.
    pub fn unwatch(&mut self, node: NodeId) -> Option<WatchEntry> {
        let entry = self.entries.remove(node)?;
        self.order.retain(|&n| n != node);
        Some(entry)
    }

    pub fn get(&self, node: NodeId) -> Option<&WatchEntry> {
        self.entries.get(node)
    }

    /// Whether `node` has fired.
    pub fn is_fired(&self, node: NodeId) -> bool {
        self.entries.get(node).is_some_and(|e| e.fired)
    }

    /// Whether `node` is still being observed.
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.entries.get(node).is_some_and(|e| !e.fired)
    }

    /// Every entry in watch order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &WatchEntry)> {
        self.order
            .iter()
            .filter_map(|&node| self.entries.get(node).map(|entry| (node, entry)))
    }

    /// Nodes still waiting to fire, in watch order.
    pub fn pending(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&n| self.is_observed(n))
            .collect()
    }

    /// Number of watched nodes, fired or not.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Fire every pending node that currently intersects the viewport.
    ///
    /// Returns the newly fired nodes in watch order. Nodes that left the DOM
    /// are skipped and stay pending.
    pub fn collect_due(
        &mut self,
        dom: &Dom,
        viewport: &Viewport,
        options: &ObserverConfig,
    ) -> Vec<NodeId> {
        let mut fired = Vec::new();
        for &node in &self.order {
            let Some(entry) = self.entries.get_mut(node) else {
                continue;
            };
            if entry.fired || !dom.is_attached(node) {
                continue;
            }
            let Some(data) = dom.get(node) else {
                continue;
            };
            if is_intersecting(&data.rect, viewport, options) {
                entry.fired = true;
                fired.push(node);
            }
        }
        fired
    }
}

// ===========================================================================
// Tests
// ===========================================================================
