//! Rendering module for laying out document trees as page operations.

mod json;
mod layout;
mod options;
mod page;
mod result;
mod state;
mod toc;
mod writer;

pub use json::{to_json, JsonFormat};
pub use layout::{PageCursor, LINE_HEIGHT_MM};
pub use options::{PageSize, RenderOptions};
pub use page::{render_document, PageRenderer};
pub use result::RenderStats;
pub use state::{heading_size, FontFamily, FontWeight, RenderState, MIN_FONT_SIZE};
pub use toc::TocEntry;
pub use writer::{DiscardWriter, OpRecorder, PageOp, PageWriter};
