//! Reverse direction: flat page text back to structured text.

mod classify;
mod frontmatter;
mod options;
mod reconstructor;
mod source;

pub use classify::{classify, LineKind, ReconstructionState, FENCE_MARKER};
pub use frontmatter::Frontmatter;
pub use options::{ReconstructOptions, DEFAULT_TITLE, SOURCE_TAG};
pub use reconstructor::{reconstruct, Irregularity, Reconstruction, TextReconstructor};
pub use source::{FileTextSource, PageTextSource, PlainTextSource};
