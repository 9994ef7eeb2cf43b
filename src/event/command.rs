//! Host commands: requests the page cannot fulfil on its own.

use std::collections::VecDeque;

/// A request for the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCommand {
    /// Scroll the window to document offset `top`.
    ScrollTo { top: f64, smooth: bool },
}

/// FIFO of pending host commands.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<HostCommand>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command.
    pub fn push(&mut self, command: HostCommand) {
        self.queue.push_back(command);
    }

    /// Drain all pending commands in the order they were issued.
    pub fn drain(&mut self) -> Vec<HostCommand> {
        self.queue.drain(..).collect()
    }

    /// Number of pending commands.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
