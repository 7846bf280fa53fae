//! Page renderer: walks a node tree and drives a [`PageWriter`].
//!
//! Traversal is pre-order. Every handler receives the current
//! [`RenderState`] by value and returns the state its following sibling
//! should see. Font changes made for a heading or code block are undone
//! with an explicit `SetFont` once the node is finished. Link coloring is
//! scoped to the enclosing block: it stays on for the rest of the block
//! and is cleared when the next paragraph, heading or list item starts.

use crate::error::{Error, Result};
use crate::model::Node;

use super::layout::PageCursor;
use super::result::RenderStats;
use super::state::{FontFamily, FontWeight, RenderState};
use super::toc::TocEntry;
use super::writer::{DiscardWriter, PageOp, PageWriter};
use super::RenderOptions;

const HEADING_GAP_MM: f32 = 5.0;
const PARAGRAPH_GAP_MM: f32 = 5.0;
const LIST_GAP_MM: f32 = 3.0;
const TITLE_GAP_MM: f32 = 15.0;
const TITLE_SIZE_BOOST: f32 = 4.0;

const BULLET_GLYPH: &str = "• ";

/// Deepest node tree the renderer walks.
pub const MAX_TREE_DEPTH: usize = 256;
const CODE_FILL: (u8, u8, u8) = (245, 245, 245);
const LINK_COLOR: (u8, u8, u8) = (0, 0, 255);
const TEXT_COLOR: (u8, u8, u8) = (0, 0, 0);

/// Render a document tree with the given options.
pub fn render_document(
    doc: &Node,
    options: &RenderOptions,
    writer: &mut dyn PageWriter,
) -> Result<RenderStats> {
    PageRenderer::new(options.clone()).render(doc, writer)
}

/// Renders node trees onto pages.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    options: RenderOptions,
    title: Option<String>,
}

impl PageRenderer {
    /// Create a new page renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            title: None,
        }
    }

    /// Write a title block at the top of the first body page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
        self
    }

    /// Rendering options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document tree.
    ///
    /// Writer errors are returned as-is; nothing is retried.
    pub fn render(&self, doc: &Node, writer: &mut dyn PageWriter) -> Result<RenderStats> {
        let entries = if self.options.toc {
            self.collect_toc(doc)?
        } else {
            Vec::new()
        };

        let mut pass = Pass::new(&self.options, writer);
        if !entries.is_empty() {
            let toc_pages = self.measure_toc(&entries)?;
            log::debug!(
                "Table of contents: {} entries on {} page(s)",
                entries.len(),
                toc_pages
            );
            pass.contents(&entries, toc_pages)?;
        }

        pass.open_body(self.title.as_deref())?;
        pass.visit(doc, RenderState::new(self.options.base_font_size))?;
        Ok(pass.finish())
    }

    /// Render raw text as one monospace block, without structural parsing.
    pub fn render_monospace(&self, text: &str, writer: &mut dyn PageWriter) -> Result<RenderStats> {
        let mut pass = Pass::new(&self.options, writer);
        pass.open_body(self.title.as_deref())?;

        let base = RenderState::new(self.options.base_font_size);
        let mono = RenderState {
            font_family: FontFamily::Mono,
            ..base
        };
        pass.set_font(&mono)?;
        pass.write_block(text, false)?;
        pass.set_font(&base)?;
        Ok(pass.finish())
    }

    /// Layout-only pass that records where each heading lands.
    fn collect_toc(&self, doc: &Node) -> Result<Vec<TocEntry>> {
        let mut discard = DiscardWriter;
        let mut pass = Pass::new(&self.options, &mut discard);
        pass.open_body(self.title.as_deref())?;
        pass.visit(doc, RenderState::new(self.options.base_font_size))?;
        Ok(pass.toc)
    }

    fn measure_toc(&self, entries: &[TocEntry]) -> Result<u32> {
        let mut discard = DiscardWriter;
        let mut pass = Pass::new(&self.options, &mut discard);
        pass.contents(entries, 0)?;
        Ok(pass.cursor.pages())
    }
}

/// One walk over a tree into one writer.
struct Pass<'a> {
    options: &'a RenderOptions,
    writer: &'a mut dyn PageWriter,
    cursor: PageCursor,
    current_size: f32,
    stats: RenderStats,
    toc: Vec<TocEntry>,
    body_start: u32,
    depth: usize,
}

impl<'a> Pass<'a> {
    fn new(options: &'a RenderOptions, writer: &'a mut dyn PageWriter) -> Self {
        Self {
            options,
            writer,
            cursor: PageCursor::new(options),
            current_size: options.base_font_size,
            stats: RenderStats::new(),
            toc: Vec::new(),
            body_start: 0,
            depth: 0,
        }
    }

    fn finish(mut self) -> RenderStats {
        self.stats.page_count = self.cursor.pages();
        if self.options.toc {
            self.stats.toc_entry_count = self.toc.len() as u32;
        }
        self.stats
    }

    /// Send one operation, breaking the page first if it would overflow.
    fn emit(&mut self, op: PageOp) -> Result<()> {
        let height = match &op {
            PageOp::LineBreak { height } => *height,
            PageOp::WriteTextBlock { text, .. } => {
                self.cursor.text_height(text, self.current_size)
            }
            _ => 0.0,
        };

        if height > 0.0 && !self.cursor.fits(height) {
            self.new_page()?;
        }
        if let PageOp::SetFont { size_pt, .. } = &op {
            self.current_size = *size_pt;
        }
        if let PageOp::WriteTextBlock { .. } = &op {
            self.stats.text_block_count += 1;
        }

        self.writer.write_op(op)?;
        self.cursor.advance(height);
        Ok(())
    }

    fn new_page(&mut self) -> Result<()> {
        self.writer.write_op(PageOp::NewPage)?;
        self.cursor.new_page();
        log::debug!("Opened page {}", self.cursor.pages());
        Ok(())
    }

    fn set_font(&mut self, state: &RenderState) -> Result<()> {
        let family = match state.font_family {
            FontFamily::Main => self.options.main_font.clone(),
            FontFamily::Mono => self.options.mono_font.clone(),
        };
        self.emit(PageOp::SetFont {
            family,
            weight: state.weight,
            size_pt: state.size_pt,
        })
    }

    fn write_block(&mut self, text: &str, filled: bool) -> Result<()> {
        self.emit(PageOp::WriteTextBlock {
            text: text.to_string(),
            filled,
        })
    }

    fn set_text_color(&mut self, (r, g, b): (u8, u8, u8)) -> Result<()> {
        self.emit(PageOp::SetTextColor { r, g, b })
    }

    fn set_fill(&mut self, on: bool) -> Result<()> {
        let (r, g, b) = CODE_FILL;
        self.emit(PageOp::SetFill { r, g, b, on })
    }

    /// Contents section: heading list with final page numbers.
    fn contents(&mut self, entries: &[TocEntry], toc_pages: u32) -> Result<()> {
        let base = RenderState::new(self.options.base_font_size);
        let title = RenderState {
            weight: FontWeight::Bold,
            size_pt: self.options.base_font_size + TITLE_SIZE_BOOST,
            ..base
        };

        self.new_page()?;
        self.set_font(&title)?;
        self.write_block("Contents", false)?;
        self.emit(PageOp::LineBreak {
            height: HEADING_GAP_MM * 2.0,
        })?;
        self.set_font(&base)?;
        for entry in entries {
            self.write_block(&entry.line(toc_pages), false)?;
        }
        Ok(())
    }

    /// Open the first body page and write the optional title block.
    fn open_body(&mut self, title: Option<&str>) -> Result<()> {
        self.new_page()?;
        self.body_start = self.cursor.pages() - 1;

        let base = RenderState::new(self.options.base_font_size);
        if let Some(title) = title {
            let heading = RenderState {
                weight: FontWeight::Bold,
                size_pt: self.options.base_font_size + TITLE_SIZE_BOOST,
                ..base
            };
            self.set_font(&heading)?;
            self.write_block(title, false)?;
            self.emit(PageOp::LineBreak {
                height: TITLE_GAP_MM,
            })?;
        }
        self.set_font(&base)
    }

    /// Emit the color reset owed by a previous link and clear the flag.
    fn enter_block(&mut self, state: RenderState) -> Result<RenderState> {
        if state.link_color_active {
            self.set_text_color(TEXT_COLOR)?;
        }
        Ok(state.clear_link())
    }

    fn visit_children(&mut self, children: &[Node], mut state: RenderState) -> Result<RenderState> {
        for child in children {
            state = self.visit(child, state)?;
        }
        Ok(state)
    }

    fn visit(&mut self, node: &Node, state: RenderState) -> Result<RenderState> {
        if self.depth >= MAX_TREE_DEPTH {
            return Err(Error::Render(format!(
                "document tree deeper than {} levels",
                MAX_TREE_DEPTH
            )));
        }
        self.depth += 1;
        let result = self.visit_node(node, state);
        self.depth -= 1;
        result
    }

    fn visit_node(&mut self, node: &Node, state: RenderState) -> Result<RenderState> {
        match node {
            Node::Document { children } => self.visit_children(children, state),
            Node::Heading { level, children } => self.visit_heading(*level, children, state),
            Node::Paragraph { children } => {
                self.stats.paragraph_count += 1;
                let state = self.enter_block(state)?;
                self.emit(PageOp::LineBreak {
                    height: PARAGRAPH_GAP_MM,
                })?;
                self.visit_children(children, state)
            }
            Node::Text { literal } => self.visit_text(literal, state),
            Node::CodeBlock { literal, .. } => self.visit_code(literal, state),
            Node::Link { children, .. } => {
                self.stats.link_count += 1;
                let linked = state.link(self.options.color_links);
                if linked.link_color_active && !state.link_color_active {
                    self.set_text_color(LINK_COLOR)?;
                }
                self.visit_children(children, linked)
            }
            Node::List {
                ordered,
                start,
                items,
            } => {
                self.emit(PageOp::LineBreak {
                    height: LIST_GAP_MM,
                })?;
                let mut state = state;
                for (idx, item) in items.iter().enumerate() {
                    let glyph = if *ordered {
                        format!("{}. ", start.saturating_add(idx as u64))
                    } else {
                        BULLET_GLYPH.to_string()
                    };
                    state = self.visit_list_item(item, glyph, state)?;
                }
                Ok(state)
            }
            Node::ListItem { .. } => self.visit_list_item(node, BULLET_GLYPH.to_string(), state),
        }
    }

    fn visit_heading(&mut self, level: u8, children: &[Node], state: RenderState) -> Result<RenderState> {
        self.stats.heading_count += 1;
        let state = self.enter_block(state)?;

        self.emit(PageOp::LineBreak {
            height: HEADING_GAP_MM,
        })?;
        let heading = state.heading(level, self.options.base_font_size);
        self.set_font(&heading)?;

        // The entry must name the page the title text lands on, so break
        // here if the whole title will not fit below the gap.
        let title: String = children.iter().map(Node::plain_text).collect();
        let title_height = self.cursor.text_height(&title, heading.size_pt);
        if !title.is_empty() && !self.cursor.fits(title_height) {
            self.new_page()?;
        }
        self.toc.push(TocEntry {
            title,
            level,
            page: self.cursor.pages() - self.body_start,
        });

        let after = self.visit_children(children, heading)?;
        self.set_font(&state)?;
        Ok(RenderState {
            link_color_active: after.link_color_active,
            ..state
        })
    }

    fn visit_text(&mut self, literal: &str, state: RenderState) -> Result<RenderState> {
        if literal.is_empty() {
            return Ok(state);
        }
        if state.in_code {
            let mono = RenderState {
                font_family: FontFamily::Mono,
                ..state
            };
            self.set_font(&mono)?;
        }
        self.write_block(literal, state.in_code && self.options.highlight)?;
        if state.in_code {
            let main = RenderState {
                font_family: FontFamily::Main,
                ..state
            };
            self.set_font(&main)?;
        }
        Ok(state)
    }

    fn visit_code(&mut self, literal: &str, state: RenderState) -> Result<RenderState> {
        self.stats.code_block_count += 1;
        let code = state.code(self.options.base_font_size, self.options.highlight);

        self.set_font(&code)?;
        if code.highlight_fill {
            self.set_fill(true)?;
        }
        self.write_block(literal, code.highlight_fill)?;
        self.set_font(&state)?;
        if code.highlight_fill {
            self.set_fill(false)?;
        }
        Ok(state)
    }

    fn visit_list_item(&mut self, item: &Node, glyph: String, state: RenderState) -> Result<RenderState> {
        self.stats.list_item_count += 1;
        let state = self.enter_block(state)?;
        self.emit(PageOp::WriteGlyph { glyph })?;
        self.visit_children(item.children(), state)
    }
}
