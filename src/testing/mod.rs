//! Headless testing support: Pilot, DOM dumps, a sample page.
//!
//! Use the [`Pilot`] to drive a mounted [`Page`](crate::page::Page) by hand,
//! [`dump_dom`] / [`dump_subtree`] to capture page state as text for snapshot
//! assertions, and [`sample_portfolio`] for a realistic page to test against.

pub mod fixture;
pub mod pilot;
pub mod snapshot;

pub use fixture::{sample_portfolio, Portfolio};
pub use pilot::Pilot;
pub use snapshot::{describe, dump_dom, dump_subtree};
