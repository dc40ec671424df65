use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed note: an ordered sequence of block nodes, top to bottom.
///
/// Built by [`crate::parse`] in a single pass and immutable afterwards. The
/// tree is a single ownership hierarchy rooted here; nodes are never shared
/// between documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<BlockNode>,
}

/// A paragraph of inline content.
///
/// Also the only block kind a `quote` may contain, which is why it is a
/// standalone struct rather than fields on [`BlockNode::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub indent: u32,
    pub content: Vec<InlineNode>,
}

/// Attributes of an image block.
///
/// Exactly one of `file_id` (current format) or `src` (legacy external-URL
/// format) is populated; the parser rejects tags carrying both or neither.
/// `width`/`height` are advisory layout hints and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub file_id: Option<String>,
    pub src: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
    pub imgshow: Option<String>,
}

/// A top-level structural unit of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockNode {
    /// A paragraph.
    Text(TextBlock),
    /// One unordered list item.
    Bullet { indent: u32, content: Vec<InlineNode> },
    /// One ordered list item. `input_number` is the ordinal the author typed;
    /// it is preserved verbatim, never recomputed.
    Ordered {
        indent: u32,
        input_number: u32,
        content: Vec<InlineNode>,
    },
    /// A checkbox item. `level` is an opaque styling tier, independent of
    /// `indent`.
    Checkbox {
        indent: u32,
        level: u32,
        checked: bool,
        content: Vec<InlineNode>,
    },
    /// A horizontal rule. Carries nothing.
    Rule,
    Image(ImageBlock),
    Audio { file_id: String, temporary: bool },
    /// A container of nested paragraphs. Does not itself carry an indent.
    Quote { children: Vec<TextBlock> },
}

/// Inline content: a leaf run of plain text (already entity-decoded) or a
/// formatting wrapper around more inline content. Nesting depth is unbounded.
///
/// A `Formatted` node's `content` is never empty when produced by the parser;
/// `color` is populated only for [`FormatKind::Highlight`] and holds an
/// `#RRGGBBAA` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineNode {
    Text(String),
    Formatted {
        kind: FormatKind,
        color: Option<String>,
        content: Vec<InlineNode>,
    },
}

/// The closed set of inline formatting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Heading1,
    Heading2,
    Heading3,
    CenterAlign,
    RightAlign,
    Highlight,
}

impl FormatKind {
    /// The wire tag this kind reads from and writes to.
    pub fn tag(self) -> &'static str {
        match self {
            FormatKind::Bold => "b",
            FormatKind::Italic => "i",
            FormatKind::Underline => "u",
            FormatKind::Strikethrough => "delete",
            FormatKind::Heading1 => "size",
            FormatKind::Heading2 => "mid-size",
            FormatKind::Heading3 => "h3-size",
            FormatKind::CenterAlign => "center",
            FormatKind::RightAlign => "right",
            FormatKind::Highlight => "background",
        }
    }

    /// Maps a wire tag to its kind. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<FormatKind> {
        Some(match tag {
            "b" => FormatKind::Bold,
            "i" => FormatKind::Italic,
            "u" => FormatKind::Underline,
            "delete" => FormatKind::Strikethrough,
            "size" => FormatKind::Heading1,
            "mid-size" => FormatKind::Heading2,
            "h3-size" => FormatKind::Heading3,
            "center" => FormatKind::CenterAlign,
            "right" => FormatKind::RightAlign,
            "background" => FormatKind::Highlight,
            _ => return None,
        })
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [FormatKind; 10] = [
        FormatKind::Bold,
        FormatKind::Italic,
        FormatKind::Underline,
        FormatKind::Strikethrough,
        FormatKind::Heading1,
        FormatKind::Heading2,
        FormatKind::Heading3,
        FormatKind::CenterAlign,
        FormatKind::RightAlign,
        FormatKind::Highlight,
    ];

    #[test]
    fn tag_mapping_round_trips() {
        for kind in ALL_KINDS {
            assert_eq!(FormatKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_maps_to_none() {
        assert_eq!(FormatKind::from_tag("blink"), None);
        assert_eq!(FormatKind::from_tag(""), None);
    }

    #[test]
    fn display_is_the_wire_tag() {
        assert_eq!(FormatKind::Strikethrough.to_string(), "delete");
        assert_eq!(FormatKind::Heading2.to_string(), "mid-size");
    }
}
