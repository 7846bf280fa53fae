//! Per-job rendering state.
//!
//! A [`RenderState`] is a small `Copy` value. The renderer passes it down
//! into each node handler and gets the updated value back, so nothing is
//! shared between conversions.

use serde::{Deserialize, Serialize};

/// Smallest font size a heading can shrink to.
pub const MIN_FONT_SIZE: f32 = 6.0;

/// Which configured font is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Main,
    Mono,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font, highlight and link state during a tree walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub font_family: FontFamily,
    pub weight: FontWeight,
    pub size_pt: f32,
    pub highlight_fill: bool,
    pub in_code: bool,
    pub link_color_active: bool,
}

impl RenderState {
    /// Body-text state at the given size.
    pub fn new(base_size: f32) -> Self {
        Self {
            font_family: FontFamily::Main,
            weight: FontWeight::Regular,
            size_pt: base_size,
            highlight_fill: false,
            in_code: false,
            link_color_active: false,
        }
    }

    /// State for the content of a heading.
    pub fn heading(self, level: u8, base_size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size_pt: heading_size(level, base_size),
            ..self
        }
    }

    /// State for a code block.
    pub fn code(self, base_size: f32, highlight: bool) -> Self {
        Self {
            font_family: FontFamily::Mono,
            weight: FontWeight::Regular,
            size_pt: base_size,
            highlight_fill: highlight,
            in_code: true,
            ..self
        }
    }

    /// State after entering a link.
    pub fn link(self, color_links: bool) -> Self {
        Self {
            link_color_active: color_links,
            ..self
        }
    }

    /// State with link coloring cleared.
    pub fn clear_link(self) -> Self {
        Self {
            link_color_active: false,
            ..self
        }
    }
}

/// Heading size: base plus `7 - level`, never below [`MIN_FONT_SIZE`].
pub fn heading_size(level: u8, base_size: f32) -> f32 {
    (base_size + (7 - i32::from(level)) as f32).max(MIN_FONT_SIZE)
}
