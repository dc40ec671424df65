use crate::ast::{FormatKind, InlineNode};
use crate::entity;

use super::attrs::{TagEnd, parse_attrs};
use super::cursor::Cursor;
use super::error::ParseError;
use super::is_tag_name_byte;

/// Parses an inline content sequence up to and including the close tag for
/// `closing`.
///
/// A maximal run of plain characters becomes one entity-decoded [`InlineNode::Text`];
/// each recognized inline tag opens a [`InlineNode::Formatted`] node that
/// recursively parses its own children with this same function, so nesting
/// depth is unbounded. `open_offset` is where the enclosing tag began, which
/// is what gets reported when its close tag never arrives.
pub(super) fn parse_inline(
    cur: &mut Cursor<'_>,
    closing: &str,
    open_offset: usize,
) -> Result<Vec<InlineNode>, ParseError> {
    let mut out = Vec::new();
    let mut run_start = cur.pos();
    loop {
        match cur.peek() {
            None => {
                return Err(ParseError::UnterminatedTag {
                    tag: closing.to_string(),
                    offset: open_offset,
                });
            }
            Some(b'<') => {
                flush_text(cur, run_start, &mut out);
                if cur.starts_with(b"</") {
                    cur.bump_n(2);
                    let name = cur.take_while(is_tag_name_byte);
                    if name == closing && cur.eat(b">") {
                        return Ok(out);
                    }
                    return Err(ParseError::UnterminatedTag {
                        tag: closing.to_string(),
                        offset: open_offset,
                    });
                }
                let tag_offset = cur.pos();
                cur.bump();
                let name = cur.take_while(is_tag_name_byte).to_string();
                let Some(kind) = FormatKind::from_tag(&name) else {
                    return Err(ParseError::UnknownTag {
                        tag: name,
                        offset: tag_offset,
                    });
                };
                let (attrs, end) = parse_attrs(cur, &name, tag_offset)?;
                let color = match kind {
                    FormatKind::Highlight => attrs.get("color").map(str::to_string),
                    _ => None,
                };
                let content = match end {
                    TagEnd::SelfClosing => Vec::new(),
                    TagEnd::Open => parse_inline(cur, &name, tag_offset)?,
                };
                // A format wrapping nothing is not representable; drop it.
                if !content.is_empty() {
                    out.push(InlineNode::Formatted {
                        kind,
                        color,
                        content,
                    });
                }
                run_start = cur.pos();
            }
            Some(_) => {
                cur.bump();
            }
        }
    }
}

fn flush_text(cur: &Cursor<'_>, run_start: usize, out: &mut Vec<InlineNode>) {
    let raw = cur.slice(run_start, cur.pos());
    if !raw.is_empty() {
        out.push(InlineNode::Text(entity::decode(raw)));
    }
}
