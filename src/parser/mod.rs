//! Structured-text parsing module.

mod inline;
mod lines;
mod markdown;

pub use inline::parse_inline;
pub use markdown::{parse_markdown, DocumentParser, MAX_NESTING_DEPTH};
