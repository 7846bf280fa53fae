//! Vertical layout estimate used to place page breaks.
//!
//! The renderer does not measure glyphs. It approximates how much vertical
//! space a text block needs from the printable width and the font size,
//! which is enough to decide where `NewPage` goes and which page a heading
//! lands on.

use super::RenderOptions;

/// Height of one wrapped text line, in millimetres.
pub const LINE_HEIGHT_MM: f32 = 5.0;

const PT_TO_MM: f32 = 0.3528;

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// Tracks the vertical position on the current page.
#[derive(Debug, Clone)]
pub struct PageCursor {
    width_mm: f32,
    height_mm: f32,
    y_mm: f32,
    pages: u32,
}

impl PageCursor {
    /// Create a cursor for the printable area described by `options`.
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            width_mm: options.content_width(),
            height_mm: options.content_height(),
            y_mm: 0.0,
            pages: 0,
        }
    }

    /// Pages opened so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Current vertical offset from the top margin.
    pub fn position(&self) -> f32 {
        self.y_mm
    }

    /// Open a new page.
    pub fn new_page(&mut self) {
        self.pages += 1;
        self.y_mm = 0.0;
    }

    /// Check whether `height` still fits on the current page. Anything fits
    /// on an empty page.
    pub fn fits(&self, height: f32) -> bool {
        self.pages > 0 && (self.y_mm == 0.0 || self.y_mm + height <= self.height_mm)
    }

    /// Move down by `height`. Blocks taller than a page spill onto
    /// following pages, which the writer breaks on its own.
    pub fn advance(&mut self, height: f32) {
        self.y_mm += height;
        while self.y_mm > self.height_mm {
            self.y_mm -= self.height_mm;
            self.pages += 1;
        }
    }

    /// Estimated height of `text` set at `size_pt`.
    pub fn text_height(&self, text: &str, size_pt: f32) -> f32 {
        let glyph_mm = (size_pt * PT_TO_MM * AVG_GLYPH_EM).max(0.1);
        let per_line = ((self.width_mm / glyph_mm).floor() as usize).max(1);

        let lines: usize = text
            .split('\n')
            .map(|line| {
                let chars = line.chars().count();
                chars.div_ceil(per_line).max(1)
            })
            .sum();
        lines as f32 * LINE_HEIGHT_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_height_wraps() {
        let cursor = PageCursor::new(&RenderOptions::default());
        assert_eq!(cursor.text_height("short", 11.0), LINE_HEIGHT_MM);
        assert_eq!(cursor.text_height("a\nb\nc", 11.0), 3.0 * LINE_HEIGHT_MM);

        let long = "x".repeat(1000);
        assert!(cursor.text_height(&long, 11.0) > 5.0 * LINE_HEIGHT_MM);
    }

    #[test]
    fn test_fits_and_breaks() {
        let mut cursor = PageCursor::new(&RenderOptions::default());
        assert!(!cursor.fits(1.0));

        cursor.new_page();
        assert!(cursor.fits(1000.0));
        cursor.advance(250.0);
        assert!(cursor.fits(7.0));
        assert!(!cursor.fits(8.0));
    }

    #[test]
    fn test_oversized_block_spills() {
        let mut cursor = PageCursor::new(&RenderOptions::default());
        cursor.new_page();
        cursor.advance(600.0);
        assert_eq!(cursor.pages(), 3);
        assert!(cursor.position() < 257.0);
    }
}
