use crate::ast::{BlockNode, ImageBlock, TextBlock};

use super::attrs::{Attrs, TagEnd, parse_attrs};
use super::cursor::Cursor;
use super::error::ParseError;
use super::inline::parse_inline;
use super::is_tag_name_byte;

/// Marker glyph opening the legacy inline image syntax.
const LEGACY_IMAGE_MARKER: &str = "☺";

/// Block-level tags other than `text`, for the quote-nesting diagnostic.
const NON_TEXT_BLOCK_TAGS: [&str; 7] = ["bullet", "order", "input", "hr", "img", "sound", "quote"];

/// Parses blocks in document order until end of input.
pub(super) fn parse_blocks(cur: &mut Cursor<'_>) -> Result<Vec<BlockNode>, ParseError> {
    let mut blocks = Vec::new();
    loop {
        cur.skip_ws();
        if cur.eof() {
            return Ok(blocks);
        }
        blocks.push(parse_block(cur)?);
    }
}

fn parse_block(cur: &mut Cursor<'_>) -> Result<BlockNode, ParseError> {
    if cur.starts_with(LEGACY_IMAGE_MARKER.as_bytes()) {
        return parse_legacy_image(cur);
    }
    let tag_offset = cur.pos();
    if cur.peek() != Some(b'<') {
        return Err(stray_text(cur));
    }
    if cur.starts_with(b"</") {
        cur.bump_n(2);
        let name = cur.take_while(is_tag_name_byte);
        return Err(ParseError::UnknownTag {
            tag: name.to_string(),
            offset: tag_offset,
        });
    }
    cur.bump();
    let name = cur.take_while(is_tag_name_byte).to_string();
    match name.as_str() {
        "text" => Ok(BlockNode::Text(parse_text_body(cur, tag_offset)?)),
        "bullet" => {
            let (attrs, end) = parse_attrs(cur, "bullet", tag_offset)?;
            Ok(BlockNode::Bullet {
                indent: attrs.uint_or("indent", 0)?,
                content: parse_content(cur, "bullet", tag_offset, end)?,
            })
        }
        "order" => {
            let (attrs, end) = parse_attrs(cur, "order", tag_offset)?;
            Ok(BlockNode::Ordered {
                indent: attrs.uint_or("indent", 0)?,
                input_number: attrs.uint_or("inputnumber", 1)?,
                content: parse_content(cur, "order", tag_offset, end)?,
            })
        }
        "input" => {
            let (attrs, end) = parse_attrs(cur, "input", tag_offset)?;
            if attrs.get("type") != Some("checkbox") {
                return Err(attrs.invalid("type"));
            }
            Ok(BlockNode::Checkbox {
                indent: attrs.uint_or("indent", 0)?,
                level: attrs.uint_or("level", 1)?,
                checked: attrs.flag("checked")?,
                content: parse_content(cur, "input", tag_offset, end)?,
            })
        }
        "hr" => {
            let (_, end) = parse_attrs(cur, "hr", tag_offset)?;
            require_self_closing(end, "hr", tag_offset)?;
            Ok(BlockNode::Rule)
        }
        "img" => {
            let (attrs, end) = parse_attrs(cur, "img", tag_offset)?;
            require_self_closing(end, "img", tag_offset)?;
            Ok(BlockNode::Image(image_from_attrs(&attrs)?))
        }
        "sound" => {
            let (attrs, end) = parse_attrs(cur, "sound", tag_offset)?;
            require_self_closing(end, "sound", tag_offset)?;
            Ok(BlockNode::Audio {
                file_id: attrs.require("fileid")?.to_string(),
                temporary: attrs.flag("temporary")?,
            })
        }
        "quote" => {
            let (_, end) = parse_attrs(cur, "quote", tag_offset)?;
            let children = match end {
                TagEnd::SelfClosing => Vec::new(),
                TagEnd::Open => parse_quote_children(cur, tag_offset)?,
            };
            Ok(BlockNode::Quote { children })
        }
        _ => Err(ParseError::UnknownTag {
            tag: name,
            offset: tag_offset,
        }),
    }
}

/// Parses the attribute list and inline body of a `text` block. The tag name
/// and the leading `<text` are already consumed.
fn parse_text_body(cur: &mut Cursor<'_>, tag_offset: usize) -> Result<TextBlock, ParseError> {
    let (attrs, end) = parse_attrs(cur, "text", tag_offset)?;
    Ok(TextBlock {
        indent: attrs.uint_or("indent", 0)?,
        content: parse_content(cur, "text", tag_offset, end)?,
    })
}

fn parse_content(
    cur: &mut Cursor<'_>,
    tag: &str,
    tag_offset: usize,
    end: TagEnd,
) -> Result<Vec<crate::ast::InlineNode>, ParseError> {
    match end {
        TagEnd::SelfClosing => Ok(Vec::new()),
        TagEnd::Open => parse_inline(cur, tag, tag_offset),
    }
}

fn require_self_closing(end: TagEnd, tag: &str, offset: usize) -> Result<(), ParseError> {
    match end {
        TagEnd::SelfClosing => Ok(()),
        TagEnd::Open => Err(ParseError::UnterminatedTag {
            tag: tag.to_string(),
            offset,
        }),
    }
}

/// The interior of a `quote`: only `text` blocks are admissible.
fn parse_quote_children(
    cur: &mut Cursor<'_>,
    open_offset: usize,
) -> Result<Vec<TextBlock>, ParseError> {
    let mut children = Vec::new();
    loop {
        cur.skip_ws();
        if cur.eat(b"</quote>") {
            return Ok(children);
        }
        if cur.eof() {
            return Err(ParseError::UnterminatedTag {
                tag: "quote".to_string(),
                offset: open_offset,
            });
        }
        let tag_offset = cur.pos();
        if cur.starts_with(LEGACY_IMAGE_MARKER.as_bytes()) {
            return Err(ParseError::UnexpectedNestedBlock {
                tag: "img".to_string(),
                offset: tag_offset,
            });
        }
        if cur.peek() != Some(b'<') {
            return Err(stray_text(cur));
        }
        if cur.starts_with(b"</") {
            cur.bump_n(2);
            let name = cur.take_while(is_tag_name_byte);
            return Err(ParseError::UnknownTag {
                tag: name.to_string(),
                offset: tag_offset,
            });
        }
        cur.bump();
        let name = cur.take_while(is_tag_name_byte).to_string();
        if name == "text" {
            children.push(parse_text_body(cur, tag_offset)?);
        } else if NON_TEXT_BLOCK_TAGS.contains(&name.as_str()) {
            return Err(ParseError::UnexpectedNestedBlock {
                tag: name,
                offset: tag_offset,
            });
        } else {
            return Err(ParseError::UnknownTag {
                tag: name,
                offset: tag_offset,
            });
        }
    }
}

/// The legacy inline image: `☺fileid<flag>` with an optional `<description>`
/// immediately after. Import-only; the generator always re-emits `<img/>`.
fn parse_legacy_image(cur: &mut Cursor<'_>) -> Result<BlockNode, ParseError> {
    let offset = cur.pos();
    let malformed = || ParseError::UnknownTag {
        tag: LEGACY_IMAGE_MARKER.to_string(),
        offset,
    };

    cur.bump_n(LEGACY_IMAGE_MARKER.len());
    let file_id = cur.take_while(is_file_id_byte).to_string();
    if file_id.is_empty() || !cur.eat(b"<") {
        return Err(malformed());
    }
    let flag = cur.take_while(|b| b.is_ascii_digit()).to_string();
    if flag.is_empty() || !cur.eat(b">") {
        return Err(malformed());
    }
    let mut description = None;
    if cur.eat(b"<") {
        let desc = cur.take_while(|b| b != b'<' && b != b'>');
        if !desc.is_empty() {
            description = Some(desc.to_string());
        }
        if !cur.eat(b">") {
            return Err(malformed());
        }
    }
    Ok(BlockNode::Image(ImageBlock {
        file_id: Some(file_id),
        src: None,
        width: None,
        height: None,
        description,
        imgshow: Some(flag),
    }))
}

fn is_file_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'-'
}

/// Text at block level belongs inside a block tag; report the offending
/// token as the "tag" that was not understood.
fn stray_text(cur: &mut Cursor<'_>) -> ParseError {
    let offset = cur.pos();
    let token = cur.take_while(|b| !b.is_ascii_whitespace() && b != b'<');
    ParseError::UnknownTag {
        tag: token.to_string(),
        offset,
    }
}

fn image_from_attrs(attrs: &Attrs) -> Result<ImageBlock, ParseError> {
    let file_id = attrs.get("fileid").map(str::to_string);
    let src = attrs.get("src").map(str::to_string);
    match (&file_id, &src) {
        (Some(_), Some(_)) => return Err(attrs.invalid("src")),
        (None, None) => return Err(attrs.invalid("fileid")),
        _ => {}
    }
    Ok(ImageBlock {
        file_id,
        src,
        width: attrs.uint("width")?,
        height: attrs.uint("height")?,
        description: attrs
            .get("imgdes")
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        imgshow: Some(attrs.get("imgshow").unwrap_or("0").to_string()),
    })
}
