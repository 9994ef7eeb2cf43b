//! Event system: page events, listener routing, host commands.

pub mod command;
pub mod input;
pub mod listener;

pub use command::{CommandQueue, HostCommand};
pub use input::{EventKind, Key, PageEvent};
pub use listener::{bubble_path, Behavior, Delivery, Listener, ListenerId, ListenerRegistry, Scope};
