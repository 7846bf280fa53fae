//! Flat page text to structured text.
//!
//! One forward scan, one line at a time, with O(1) state. Irregularities in
//! the input never abort the pass; they are reported next to the output so
//! the caller can decide whether to warn.

use serde::Serialize;

use super::classify::{classify, LineKind, ReconstructionState};
use super::frontmatter::Frontmatter;
use super::options::ReconstructOptions;

const MIN_LEVEL: i64 = 1;
const MAX_LEVEL: i64 = 6;

/// Recoverable oddity found while reconstructing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Irregularity {
    /// Input ended inside a fenced block
    UnterminatedFence { opened_at_line: usize },
    /// A heading level fell outside 1..=6 after adjustment
    HeadingLevelClamped {
        line: usize,
        requested: i64,
        applied: u8,
    },
}

impl std::fmt::Display for Irregularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Irregularity::UnterminatedFence { opened_at_line } => {
                write!(f, "code fence opened at line {} is never closed", opened_at_line)
            }
            Irregularity::HeadingLevelClamped {
                line,
                requested,
                applied,
            } => write!(
                f,
                "heading at line {} requested level {}, clamped to {}",
                line, requested, applied
            ),
        }
    }
}

/// Output of a reconstruction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    /// Structured text, frontmatter included
    pub markdown: String,
    /// Oddities seen along the way, in input order
    pub irregularities: Vec<Irregularity>,
}

impl Reconstruction {
    /// Check whether anything irregular was seen.
    pub fn has_irregularities(&self) -> bool {
        !self.irregularities.is_empty()
    }
}

/// Rebuilds structured text from flat page text.
#[derive(Debug, Clone, Default)]
pub struct TextReconstructor {
    options: ReconstructOptions,
}

impl TextReconstructor {
    /// Create a reconstructor with the given options.
    pub fn new(options: ReconstructOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct `text`, reporting irregularities.
    pub fn reconstruct(&self, text: &str) -> Reconstruction {
        let mut out = String::with_capacity(text.len() + 64);
        if self.options.add_frontmatter {
            out.push_str(&Frontmatter::from_options(&self.options).to_string());
        }

        let mut lines: Vec<String> = Vec::new();
        let mut irregularities = Vec::new();
        let mut state = ReconstructionState::default();
        let mut fence_opened_at = 0;

        for (idx, raw) in text.split('\n').enumerate() {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let number = idx + 1;

            if !self.options.cleanup {
                lines.push(raw.trim().to_string());
                continue;
            }

            let (kind, next) = classify(raw, state);
            let was_blank = state.last_emitted_was_blank;
            state = next;

            let emitted = match kind {
                LineKind::Blank => {
                    if was_blank {
                        continue;
                    }
                    String::new()
                }
                LineKind::FenceToggle => {
                    if state.in_fence {
                        fence_opened_at = number;
                    }
                    raw.trim().to_string()
                }
                LineKind::Passthrough => raw.trim_end().to_string(),
                LineKind::Heading { level, title } => {
                    let applied = self.adjust_level(level, number, &mut irregularities);
                    let hashes = "#".repeat(usize::from(applied));
                    // A bare `#` stays bare: no trailing space after the hashes.
                    if title.is_empty() {
                        hashes
                    } else {
                        format!("{} {}", hashes, title)
                    }
                }
                LineKind::Bullet { text } => format!("- {}", text),
                LineKind::Numbered { label, text } => format!("{}. {}", label, text),
                LineKind::Plain => raw.trim().to_string(),
            };

            state.last_emitted_was_blank = matches!(kind, LineKind::Blank);
            lines.push(emitted);
        }

        if state.in_fence {
            irregularities.push(Irregularity::UnterminatedFence {
                opened_at_line: fence_opened_at,
            });
        }

        out.push_str(&lines.join("\n"));
        Reconstruction {
            markdown: out,
            irregularities,
        }
    }

    fn adjust_level(&self, level: usize, line: usize, irregularities: &mut Vec<Irregularity>) -> u8 {
        let requested = i64::try_from(level)
            .unwrap_or(i64::MAX)
            .saturating_add(i64::from(self.options.header_level_adjust));
        let applied = requested.clamp(MIN_LEVEL, MAX_LEVEL);
        if applied != requested {
            irregularities.push(Irregularity::HeadingLevelClamped {
                line,
                requested,
                applied: applied as u8,
            });
        }
        applied as u8
    }
}

/// Reconstruct `text` with `options`, discarding the irregularity report.
pub fn reconstruct(text: &str, options: &ReconstructOptions) -> String {
    TextReconstructor::new(options.clone()).reconstruct(text).markdown
}
