//! # pagemark
//!
//! Bidirectional conversion between Markdown notes and fixed-layout pages.
//!
//! The forward direction parses structured text into a node tree and lays
//! it out as a stream of page operations for a [`render::PageWriter`]. The
//! reverse direction takes the flat text a page extractor recovers and
//! rebuilds structured text from it, line by line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagemark::{render_markdown, reconstruct_text, ReconstructOptions, RenderOptions};
//! use pagemark::render::OpRecorder;
//!
//! fn main() -> pagemark::Result<()> {
//!     // Structured text to page operations
//!     let mut pages = OpRecorder::new();
//!     let stats = render_markdown(b"# Notes\n\nHello.", &RenderOptions::default(), &mut pages)?;
//!     println!("{} pages", stats.page_count);
//!
//!     // Flat page text back to structured text
//!     let markdown = reconstruct_text("# Notes\n* item", &ReconstructOptions::default());
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block-scoped rendering state**: fonts, fills and link colors never
//!   leak between blocks
//! - **Pagination**: page breaks and an optional table of contents
//! - **Lossless code**: fenced content is never reinterpreted in either
//!   direction
//! - **Parallel batches**: independent files convert concurrently with Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod reconstruct;
pub mod render;

// Re-export commonly used types
pub use convert::{
    pages_to_markdown, render_batch, render_batch_with, render_file, BatchOutcome,
    ConversionOptions, ConverterRegistry, DocumentConverter,
};
pub use error::{Error, Result};
pub use model::Node;
pub use parser::DocumentParser;
pub use reconstruct::{
    classify, Irregularity, LineKind, PageTextSource, ReconstructOptions, Reconstruction,
    ReconstructionState, TextReconstructor,
};
pub use render::{
    JsonFormat, PageOp, PageRenderer, PageSize, PageWriter, RenderOptions, RenderState,
    RenderStats,
};

use std::path::Path;

/// Parse structured text into a document tree.
///
/// # Example
///
/// ```
/// use pagemark::{parse, Node};
///
/// let doc = parse(b"# Title\n\nBody").unwrap();
/// assert_eq!(doc.children().len(), 2);
/// ```
pub fn parse(bytes: &[u8]) -> Result<Node> {
    parser::parse_markdown(bytes)
}

/// Parse a structured text file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}

/// Parse structured text and render it to `writer`.
///
/// Nothing is written if the source fails to parse.
pub fn render_markdown(
    bytes: &[u8],
    options: &RenderOptions,
    writer: &mut dyn PageWriter,
) -> Result<RenderStats> {
    let doc = parse(bytes)?;
    render::render_document(&doc, options, writer)
}

/// Render structured text and return the operation stream as JSON.
///
/// # Example
///
/// ```
/// use pagemark::{to_json, JsonFormat, RenderOptions};
///
/// let json = to_json(b"hello", &RenderOptions::default(), JsonFormat::Compact).unwrap();
/// assert!(json.starts_with(r#"[{"op":"new_page"}"#));
/// ```
pub fn to_json(bytes: &[u8], options: &RenderOptions, format: JsonFormat) -> Result<String> {
    let mut recorder = render::OpRecorder::new();
    render_markdown(bytes, options, &mut recorder)?;
    render::to_json(recorder.ops(), format)
}

/// Rebuild structured text from flat page text.
///
/// # Example
///
/// ```
/// use pagemark::{reconstruct_text, ReconstructOptions};
///
/// let options = ReconstructOptions::new().with_frontmatter(false);
/// assert_eq!(reconstruct_text("# A\n* b", &options), "## A\n- b");
/// ```
pub fn reconstruct_text(text: &str, options: &ReconstructOptions) -> String {
    reconstruct::reconstruct(text, options)
}

/// Rebuild structured text from a flat text file.
///
/// Unless a title is set, the frontmatter is titled by the file stem.
pub fn reconstruct_file<P: AsRef<Path>>(
    path: P,
    options: &ReconstructOptions,
) -> Result<Reconstruction> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut options = options.clone();
    if options.title == reconstruct::DEFAULT_TITLE {
        options.title = detect::title_of(path);
    }
    Ok(TextReconstructor::new(options).reconstruct(&text))
}
