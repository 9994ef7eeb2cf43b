//! Listener registry and event routing.
//!
//! Every handler the page installs is recorded as a [`Listener`] with a
//! [`ListenerId`] so that teardown can remove exactly what mount added.
//! [`ListenerRegistry::route`] resolves which listeners see an event, in
//! browser order: node listeners along the bubble path (innermost first),
//! then the document, then the window.

use slotmap::{new_key_type, SlotMap};

use super::input::{EventKind, PageEvent};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

new_key_type! {
    /// Handle to a registered listener.
    pub struct ListenerId;
}

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Window,
    Document,
    Node(NodeId),
}

/// The page behavior a listener runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Hamburger click toggles the mobile menu.
    NavToggle,
    /// A menu link click closes the mobile menu.
    NavLinkClose,
    /// A click outside hamburger and menu closes the mobile menu.
    DismissOutside,
    /// Escape closes the mobile menu.
    EscapeClose,
    /// In-page anchor click scrolls smoothly to its target.
    AnchorScroll,
    /// `mailto:` link click is logged.
    MailtoLog,
    /// Header, nav and active-link reactors.
    ScrollReactors,
    /// Parallax offsets.
    Parallax,
    /// Re-evaluate watched element intersections.
    Intersections,
    /// Apply `will-change` hints once the host is idle.
    IdleHints,
}

/// A registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub kind: EventKind,
    pub scope: Scope,
    pub behavior: Behavior,
}

impl Listener {
    pub fn new(kind: EventKind, scope: Scope, behavior: Behavior) -> Self {
        Self {
            kind,
            scope,
            behavior,
        }
    }
}

/// One listener invocation produced by routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub id: ListenerId,
    /// The node the listener is attached to (`currentTarget`), if any.
    pub current_target: Option<NodeId>,
    pub behavior: Behavior,
}

// ---------------------------------------------------------------------------
// ListenerRegistry
// ---------------------------------------------------------------------------

/// All listeners installed on the page, in registration order.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: SlotMap<ListenerId, Listener>,
    order: Vec<ListenerId>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = self.listeners.insert(listener);
        self.order.push(id);
        id
    }

    /// Remove a listener. Returns it if it was registered.
    pub fn remove(&mut self, id: ListenerId) -> Option<Listener> {
        let listener = self.listeners.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(listener)
    }

    /// Look up a listener.
    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.listeners.get(id)
    }

    /// Remove every listener. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.order.len();
        self.listeners.clear();
        self.order.clear();
        removed
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ListenerId, &Listener)> {
        self.order
            .iter()
            .filter_map(|&id| self.listeners.get(id).map(|l| (id, l)))
    }

    /// Resolve the listeners that see `event`, in invocation order.
    pub fn route(&self, dom: &Dom, event: &PageEvent) -> Vec<Delivery> {
        let kind = event.kind();
        let mut out = Vec::new();

        if let Some(target) = event.target() {
            for node in bubble_path(dom, target) {
                out.extend(
                    self.iter()
                        .filter(|(_, l)| l.kind == kind && l.scope == Scope::Node(node))
                        .map(|(id, l)| Delivery {
                            id,
                            current_target: Some(node),
                            behavior: l.behavior,
                        }),
                );
            }
        }

        for scope in [Scope::Document, Scope::Window] {
            out.extend(
                self.iter()
                    .filter(|(_, l)| l.kind == kind && l.scope == scope)
                    .map(|(id, l)| Delivery {
                        id,
                        current_target: None,
                        behavior: l.behavior,
                    }),
            );
        }

        out
    }
}

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
/// `start` is not in the DOM.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}

// ===========================================================================
// Tests
// ===========================================================================
