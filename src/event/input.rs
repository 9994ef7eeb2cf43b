//! Page events delivered by the host.
//!
//! Defines [`PageEvent`], [`Key`] and [`EventKind`]. Hosts translate their
//! native events (browser `scroll`, `click`, `keydown`, idle callbacks) into
//! these before handing them to [`Page::handle_event`](crate::page::Page::handle_event).

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, reduced to what page behaviors react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` string.
    ///
    /// ```
    /// use scrollfx::event::Key;
    /// assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
    /// assert_eq!(Key::from_dom_key("q"), Key::Char('q'));
    /// assert_eq!(Key::from_dom_key("ArrowUp"), Key::Other);
    /// ```
    pub fn from_dom_key(key: &str) -> Key {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PageEvent
// ---------------------------------------------------------------------------

/// An event arriving from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The window scrolled to document offset `(x, y)`.
    Scroll { x: f64, y: f64 },
    /// The viewport changed size.
    Resize { width: f64, height: f64 },
    /// A click on `target`.
    Click { target: NodeId },
    /// A key went down with focus anywhere in the document.
    KeyDown(Key),
    /// The host is idle (a `requestIdleCallback` tick).
    Idle,
}

impl PageEvent {
    /// The listener category this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::KeyDown(_) => EventKind::KeyDown,
            PageEvent::Idle => EventKind::Idle,
        }
    }

    /// The node the event originated on, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            PageEvent::Click { target } => Some(*target),
            _ => None,
        }
    }
}

/// Event category used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    Click,
    KeyDown,
    Idle,
}

// ===========================================================================
// Tests
// ===========================================================================
