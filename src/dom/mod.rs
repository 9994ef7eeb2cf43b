//! Page document: slotmap-backed element tree with class/id/selector queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeId, NodeData};
pub use tree::Dom;
