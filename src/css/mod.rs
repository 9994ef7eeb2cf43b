//! Selector engine: tokenizer, parser, model, matching.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod matching;

pub use model::SelectorList;
pub use parser::{parse_selector_list, SelectorError};
