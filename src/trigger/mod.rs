//! Visibility trigger: role detection, intersection tracking, effects.

pub mod effects;
pub mod observer;
pub mod role;

pub use effects::Effects;
pub use observer::{intersection_ratio, is_intersecting, TriggerRegistry, WatchEntry};
pub use role::{RoleSelectors, Roles};
