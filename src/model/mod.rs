//! Document model for parsed structured text.
//!
//! The parser turns Markdown bytes into a tree of [`Node`] values. The tree
//! is the only input of the page renderer.

mod node;

pub use node::{Node, MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};
