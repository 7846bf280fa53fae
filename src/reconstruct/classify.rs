//! Line classification for flat page text.
//!
//! [`classify`] is a pure function of one line and the running
//! [`ReconstructionState`]. It never looks at neighbouring lines.

use std::fmt;

use serde::Serialize;

/// Marker that opens and closes a fenced block.
pub const FENCE_MARKER: &str = "```";

/// Running state of a reconstruction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionState {
    /// Inside a fenced block
    pub in_fence: bool,
    /// The last emitted line was blank
    pub last_emitted_was_blank: bool,
}

/// What a single line of flat text looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind<'a> {
    /// Empty after trimming
    Blank,
    /// Opens or closes a fenced block
    FenceToggle,
    /// Inside a fenced block; kept verbatim
    Passthrough,
    /// `#`-prefixed line
    Heading {
        /// Number of leading `#`
        level: usize,
        /// Text after the hashes
        title: &'a str,
    },
    /// `- ` or `* ` item
    Bullet { text: &'a str },
    /// `N. ` item, label kept as written
    Numbered { label: &'a str, text: &'a str },
    /// Anything else
    Plain,
}

impl LineKind<'_> {
    /// Short lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Blank => "blank",
            LineKind::FenceToggle => "fence",
            LineKind::Passthrough => "passthrough",
            LineKind::Heading { .. } => "heading",
            LineKind::Bullet { .. } => "bullet",
            LineKind::Numbered { .. } => "numbered",
            LineKind::Plain => "plain",
        }
    }
}

impl fmt::Display for LineKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Heading { level, .. } => write!(f, "heading({})", level),
            LineKind::Numbered { label, .. } => write!(f, "numbered({})", label),
            other => f.write_str(other.name()),
        }
    }
}

/// Classify one line and return the state for the next line.
///
/// A fence opens on the marker with an optional info string and closes only
/// on the bare marker. Inside a fence every other line is
/// [`LineKind::Passthrough`], so code that looks like a heading, a list
/// item or a fence with trailing text is never rewritten.
pub fn classify(line: &str, state: ReconstructionState) -> (LineKind<'_>, ReconstructionState) {
    let line = line.trim();

    if state.in_fence {
        if line == FENCE_MARKER {
            let next = ReconstructionState {
                in_fence: false,
                ..state
            };
            return (LineKind::FenceToggle, next);
        }
        return (LineKind::Passthrough, state);
    }
    if opens_fence(line) {
        let next = ReconstructionState {
            in_fence: true,
            ..state
        };
        return (LineKind::FenceToggle, next);
    }
    if line.is_empty() {
        return (LineKind::Blank, state);
    }

    let kind = heading(line)
        .or_else(|| bullet(line))
        .or_else(|| numbered(line))
        .unwrap_or(LineKind::Plain);
    (kind, state)
}

/// The marker, optionally followed by an info string without backticks.
fn opens_fence(line: &str) -> bool {
    line.strip_prefix(FENCE_MARKER)
        .is_some_and(|info| !info.contains('`'))
}

fn heading(line: &str) -> Option<LineKind<'_>> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(LineKind::Heading {
        level,
        title: rest.trim(),
    })
}

fn bullet(line: &str) -> Option<LineKind<'_>> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))?;
    Some(LineKind::Bullet { text: rest.trim() })
}

fn numbered(line: &str) -> Option<LineKind<'_>> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(LineKind::Numbered {
        label: &line[..digits],
        text: rest.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(line: &str) -> LineKind<'_> {
        classify(line, ReconstructionState::default()).0
    }

    #[test]
    fn test_blank() {
        assert_eq!(kind(""), LineKind::Blank);
        assert_eq!(kind("  \t "), LineKind::Blank);
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            kind("### Deep  "),
            LineKind::Heading {
                level: 3,
                title: "Deep"
            }
        );
        assert_eq!(kind("#"), LineKind::Heading { level: 1, title: "" });
        assert_eq!(kind("#hashtag"), LineKind::Plain);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(kind("* item"), LineKind::Bullet { text: "item" });
        assert_eq!(kind("  -   spaced "), LineKind::Bullet { text: "spaced" });
        assert_eq!(kind("-dash"), LineKind::Plain);
        assert_eq!(kind("-"), LineKind::Plain);
    }

    #[test]
    fn test_numbered() {
        assert_eq!(
            kind("12.  twelve"),
            LineKind::Numbered {
                label: "12",
                text: "twelve"
            }
        );
        assert_eq!(kind("3.14 is pi"), LineKind::Plain);
        assert_eq!(kind("1."), LineKind::Plain);
        assert_eq!(kind("a. b"), LineKind::Plain);
    }

    #[test]
    fn test_fence_guards_content() {
        let state = ReconstructionState::default();
        let (k, state) = classify("```rust", state);
        assert_eq!(k, LineKind::FenceToggle);
        assert!(state.in_fence);

        for line in ["# not a heading", "- not a bullet", "1. nope", "", "```not-a-close", "```rust"] {
            let (k, next) = classify(line, state);
            assert_eq!(k, LineKind::Passthrough);
            assert_eq!(next, state);
        }

        let (k, state) = classify("```", state);
        assert_eq!(k, LineKind::FenceToggle);
        assert!(!state.in_fence);
    }

    #[test]
    fn test_fence_open_forms() {
        let state = ReconstructionState::default();
        assert!(classify("```yaml", state).1.in_fence);
        assert!(classify("  ```", state).1.in_fence);
        assert_eq!(classify("```a`b", state).0, LineKind::Plain);
    }

    #[test]
    fn test_display() {
        assert_eq!(kind("## a").to_string(), "heading(2)");
        assert_eq!(kind("4. x").to_string(), "numbered(4)");
        assert_eq!(kind("text").to_string(), "plain");
    }
}
