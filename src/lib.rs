//! # scrollfx
//!
//! A headless engine for the scroll-driven behavior of a portfolio page.
//!
//! scrollfx keeps a retained model of the page (elements with classes, data
//! attributes, inline styles, text and layout boxes), receives page events
//! from a host, and mutates the model the way the page's script would:
//! reveal-on-scroll with staggering, counters, progress bars, a typewriter,
//! parallax, header and nav styling, active-link highlighting and a mobile
//! menu. Timers run on a virtual clock the host advances, so every behavior
//! is deterministic and testable without a browser.
//!
//! ## Core Systems
//!
//! - **[`page`]**: The `Page` controller (mount, event handling, helpers, teardown)
//! - **[`dom`]**: Slotmap-backed DOM arena with tree operations and queries
//! - **[`css`]**: Selector tokenizer, parser and matcher
//! - **[`trigger`]**: Role detection, fire-once intersection registry, effects
//! - **[`scroll`]**: Scroll-position reactors (nav, header, sections, parallax)
//! - **[`nav`]**: Mobile menu state machine
//! - **[`scheduler`]**: Virtual-clock timer queue with cancelable handles
//! - **[`animation`]**: Timer jobs for counters, typewriters and delayed writes
//! - **[`event`]**: Page events, listener routing, host commands
//! - **[`config`]**: `MotionConfig`, loadable from TOML
//! - **[`driver`]**: tokio driver running the clock in real time
//! - **[`testing`]**: `Pilot`, DOM dumps and a sample page
//! - **[`geometry`]**: Rect, Insets, Viewport primitives
//!
//! ## Example
//!
//! ```
//! use scrollfx::dom::{Dom, NodeData};
//! use scrollfx::geometry::Rect;
//! use scrollfx::event::PageEvent;
//! use scrollfx::page::Page;
//! use std::time::Duration;
//!
//! let mut dom = Dom::new();
//! let body = dom.insert(NodeData::new("body"));
//! let counter = dom.insert_child(
//!     body,
//!     NodeData::new("span")
//!         .with_class("counter")
//!         .with_data("count", "500")
//!         .with_rect(Rect::block(1200.0, 40.0)),
//! );
//!
//! let mut page = Page::new(dom)?;
//! page.mount()?;
//! page.handle_event(PageEvent::Scroll { x: 0.0, y: 900.0 });
//! page.advance(Duration::from_secs(2));
//! assert_eq!(page.dom().get(counter).map(|n| n.text.as_str()), Some("500"));
//! # Ok::<(), scrollfx::page::PageError>(())
//! ```

// Foundation
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod scheduler;

// Behaviors
pub mod animation;
pub mod nav;
pub mod scroll;
pub mod trigger;

// Events and configuration
pub mod config;
pub mod event;

// Controller
pub mod driver;
pub mod page;

// Test support
pub mod testing;

pub use config::{ConfigError, MotionConfig};
pub use page::{Dispatch, Page, PageError};
