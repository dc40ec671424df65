//! The generator: renders a [`Document`] back to markup text.
//!
//! Total and deterministic — the same tree always yields the same bytes.
//! Attribute order is fixed per tag (the order listed in each `write_*`
//! below), blocks are separated by a single newline, and text passes through
//! [`entity::encode`]. Images always come out in the `<img/>` tag form; the
//! legacy glyph syntax is import-only.

use crate::ast::{BlockNode, Document, FormatKind, ImageBlock, InlineNode, TextBlock};
use crate::entity;

/// Renders `document` to its canonical markup string.
pub fn generate(document: &Document) -> String {
    let mut out = String::new();
    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &BlockNode) {
    match block {
        BlockNode::Text(tb) => write_text_block(out, tb),
        BlockNode::Bullet { indent, content } => {
            out.push_str("<bullet");
            push_uint_attr(out, "indent", *indent);
            out.push('>');
            write_inline_seq(out, content);
            out.push_str("</bullet>");
        }
        BlockNode::Ordered {
            indent,
            input_number,
            content,
        } => {
            out.push_str("<order");
            push_uint_attr(out, "indent", *indent);
            push_uint_attr(out, "inputnumber", *input_number);
            out.push('>');
            write_inline_seq(out, content);
            out.push_str("</order>");
        }
        BlockNode::Checkbox {
            indent,
            level,
            checked,
            content,
        } => {
            out.push_str("<input");
            push_attr(out, "type", "checkbox");
            push_uint_attr(out, "indent", *indent);
            push_uint_attr(out, "level", *level);
            push_attr(out, "checked", if *checked { "true" } else { "false" });
            out.push('>');
            write_inline_seq(out, content);
            out.push_str("</input>");
        }
        BlockNode::Rule => out.push_str("<hr/>"),
        BlockNode::Image(img) => write_image(out, img),
        BlockNode::Audio { file_id, temporary } => {
            out.push_str("<sound");
            push_attr(out, "fileid", file_id);
            push_attr(out, "temporary", if *temporary { "true" } else { "false" });
            out.push_str("/>");
        }
        BlockNode::Quote { children } => {
            out.push_str("<quote>");
            for child in children {
                write_text_block(out, child);
            }
            out.push_str("</quote>");
        }
    }
}

fn write_text_block(out: &mut String, tb: &TextBlock) {
    out.push_str("<text");
    push_uint_attr(out, "indent", tb.indent);
    out.push('>');
    write_inline_seq(out, &tb.content);
    out.push_str("</text>");
}

fn write_image(out: &mut String, img: &ImageBlock) {
    out.push_str("<img");
    if let Some(id) = &img.file_id {
        push_attr(out, "fileid", id);
    } else if let Some(src) = &img.src {
        push_attr(out, "src", src);
    }
    push_attr(out, "imgshow", img.imgshow.as_deref().unwrap_or("0"));
    push_attr(out, "imgdes", img.description.as_deref().unwrap_or(""));
    if let Some(w) = img.width {
        push_uint_attr(out, "width", w);
    }
    if let Some(h) = img.height {
        push_uint_attr(out, "height", h);
    }
    out.push_str("/>");
}

fn write_inline_seq(out: &mut String, nodes: &[InlineNode]) {
    for node in nodes {
        write_inline(out, node);
    }
}

fn write_inline(out: &mut String, node: &InlineNode) {
    match node {
        InlineNode::Text(value) => out.push_str(&entity::encode(value)),
        InlineNode::Formatted {
            kind,
            color,
            content,
        } => {
            let tag = kind.tag();
            out.push('<');
            out.push_str(tag);
            if *kind == FormatKind::Highlight
                && let Some(color) = color
            {
                push_attr(out, "color", color);
            }
            out.push('>');
            write_inline_seq(out, content);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&entity::encode(value));
    out.push('"');
}

fn push_uint_attr(out: &mut String, key: &str, value: u32) {
    push_attr(out, key, &value.to_string());
}
