//! Node tree produced by the structured-text parser.

use serde::{Deserialize, Serialize};

/// Lowest heading level.
pub const MIN_HEADING_LEVEL: u8 = 1;

/// Deepest heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A node in the parsed document tree.
///
/// Trees are built once by the parser and only read afterwards. Children
/// are kept in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Root of a parsed document
    Document {
        /// Top-level blocks
        children: Vec<Node>,
    },

    /// ATX heading
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Inline content
        children: Vec<Node>,
    },

    /// Paragraph of inline content
    Paragraph {
        /// Inline content
        children: Vec<Node>,
    },

    /// Bullet or numbered list
    List {
        /// Whether items are numbered
        ordered: bool,
        /// Number of the first item (ordered lists only)
        start: u64,
        /// `ListItem` nodes
        items: Vec<Node>,
    },

    /// A single list entry
    ListItem {
        /// Inline content followed by any nested blocks
        children: Vec<Node>,
    },

    /// Fenced code block. The literal is never re-parsed.
    CodeBlock {
        /// Info string after the opening fence
        #[serde(default, skip_serializing_if = "Option::is_none")]
        info: Option<String>,
        /// Raw code text
        literal: String,
    },

    /// Inline link
    Link {
        /// Link destination
        target: String,
        /// Link text
        children: Vec<Node>,
    },

    /// Literal text run
    Text {
        /// Raw text
        literal: String,
    },
}

impl Node {
    /// Create a document node.
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document { children }
    }

    /// Create a heading, clamping the level into 1-6.
    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Node::Heading {
            level: level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL),
            children,
        }
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    /// Create a text node.
    pub fn text(literal: impl Into<String>) -> Self {
        Node::Text {
            literal: literal.into(),
        }
    }

    /// Create a link with a single text child.
    pub fn link(target: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Link {
            target: target.into(),
            children: vec![Node::text(text)],
        }
    }

    /// Create a code block.
    pub fn code_block(info: Option<String>, literal: impl Into<String>) -> Self {
        Node::CodeBlock {
            info,
            literal: literal.into(),
        }
    }

    /// Child nodes in source order. List items count as children of a list.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::ListItem { children }
            | Node::Link { children, .. } => children,
            Node::List { items, .. } => items,
            Node::CodeBlock { .. } | Node::Text { .. } => &[],
        }
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { literal } | Node::CodeBlock { literal, .. } => out.push_str(literal),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert!(matches!(Node::heading(0, vec![]), Node::Heading { level: 1, .. }));
        assert!(matches!(Node::heading(9, vec![]), Node::Heading { level: 6, .. }));
        assert!(matches!(Node::heading(3, vec![]), Node::Heading { level: 3, .. }));
    }

    #[test]
    fn test_plain_text() {
        let para = Node::paragraph(vec![
            Node::text("see "),
            Node::link("https://example.com", "here"),
            Node::text(" now"),
        ]);
        assert_eq!(para.plain_text(), "see here now");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Node::text("hi")).unwrap();
        assert_eq!(json, r#"{"type":"text","literal":"hi"}"#);
    }
}
