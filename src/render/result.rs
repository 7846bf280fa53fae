//! Statistics collected while rendering.

use serde::{Deserialize, Serialize};

/// Counts gathered during one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Pages produced, including table-of-contents pages
    pub page_count: u32,

    /// Headings rendered
    pub heading_count: u32,

    /// Paragraphs rendered
    pub paragraph_count: u32,

    /// List items rendered
    pub list_item_count: u32,

    /// Code blocks rendered
    pub code_block_count: u32,

    /// Links rendered
    pub link_count: u32,

    /// `WriteTextBlock` operations emitted
    pub text_block_count: u32,

    /// Entries in the table of contents
    pub toc_entry_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.code_block_count += other.code_block_count;
        self.link_count += other.link_count;
        self.text_block_count += other.text_block_count;
        self.toc_entry_count += other.toc_entry_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.paragraph_count = 5;
        stats1.page_count = 2;

        let stats2 = RenderStats {
            paragraph_count: 3,
            page_count: 1,
            link_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.page_count, 3);
        assert_eq!(stats1.link_count, 4);
    }
}
