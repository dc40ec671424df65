//! The markup parser.
//!
//! Input is segmented into top-level blocks in document order; content-bearing
//! blocks hand off to a recursive inline grammar. Parsing is strict and
//! atomic: the first error wins and no partial [`Document`] is ever returned.
//! The cursor is threaded explicitly through every rule, so each level is
//! reentrant and testable on its own.

mod attrs;
mod blocks;
mod cursor;
mod error;
mod inline;

pub use error::ParseError;

use crate::ast::Document;
use cursor::Cursor;

/// Parses a markup string into a [`Document`].
pub fn parse(markup: &str) -> Result<Document, ParseError> {
    let mut cur = Cursor::new(markup);
    let blocks = blocks::parse_blocks(&mut cur)?;
    Ok(Document { blocks })
}

/// Tag names are ASCII letters, digits and `-` (as in `mid-size`).
fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BlockNode, InlineNode, TextBlock};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_an_empty_document() {
        assert_eq!(parse("").unwrap(), Document { blocks: vec![] });
        assert_eq!(parse("  \n\n ").unwrap(), Document { blocks: vec![] });
    }

    #[test]
    fn document_preserves_block_order() {
        let doc = parse("<text>one</text>\n<bullet>two</bullet>\n<hr/>").unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(
            doc.blocks[0],
            BlockNode::Text(TextBlock {
                indent: 0,
                content: vec![InlineNode::Text("one".to_string())],
            })
        );
        assert_eq!(doc.blocks[2], BlockNode::Rule);
    }

    #[test]
    fn failure_yields_no_partial_document() {
        // The first block is fine; the second is not. The whole parse fails.
        let err = parse("<text>ok</text>\n<wrong>x</wrong>").unwrap_err();
        assert!(matches!(err, ParseError::UnknownTag { ref tag, .. } if tag == "wrong"));
    }

    #[test]
    fn error_offsets_point_into_the_input() {
        let input = "<text>ok</text>\n<wrong>x</wrong>";
        let offset = match parse(input).unwrap_err() {
            ParseError::UnknownTag { offset, .. } => offset,
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(&input[offset..offset + 6], "<wrong");
    }
}
