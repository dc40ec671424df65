//! Text-level canonicalization for semantic equality comparison.
//!
//! `normalize` rewrites a markup string so that two documents differing only
//! cosmetically (attribute order, boolean spelling, numeric formatting,
//! legacy vs. current image encoding, whitespace between blocks) compare
//! equal as plain strings. It deliberately does not build an AST: legacy
//! notes can be partially malformed, and anything the tolerant scanner cannot
//! recognize passes through untouched instead of failing.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::entity;

static LEGACY_IMAGE: OnceLock<Regex> = OnceLock::new();

fn legacy_image_re() -> &'static Regex {
    LEGACY_IMAGE.get_or_init(|| {
        Regex::new("☺([0-9A-Za-z._-]+)<([0-9]+)>(?:<([^<>]*)>)?")
            .expect("invalid legacy image pattern")
    })
}

/// Block tags that wrap content and close with a matching end tag.
const PAIRED_BLOCK_TAGS: [&str; 5] = ["text", "bullet", "order", "input", "quote"];
/// Block tags with no content; always rendered self-closing.
const VOID_TAGS: [&str; 3] = ["hr", "img", "sound"];
const INLINE_TAGS: [&str; 10] = [
    "b",
    "i",
    "u",
    "delete",
    "size",
    "mid-size",
    "h3-size",
    "center",
    "right",
    "background",
];

fn is_paired_block(name: &str) -> bool {
    PAIRED_BLOCK_TAGS.contains(&name)
}

fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

fn is_known(name: &str) -> bool {
    is_paired_block(name) || is_void(name) || INLINE_TAGS.contains(&name)
}

/// Rewrites `markup` into its canonical comparable form. Total and
/// idempotent; never fails, whatever the input.
pub fn normalize(markup: &str) -> String {
    let rewritten = rewrite_legacy_images(markup);
    let tokens = scan(&rewritten);
    emit(&tokens)
}

/// The same legacy-to-current image conversion the parser performs, applied
/// textually. Attribute values are entity-encoded because the glyph form
/// carries raw text.
fn rewrite_legacy_images(markup: &str) -> Cow<'_, str> {
    legacy_image_re().replace_all(markup, |caps: &Captures| {
        let mut tag = format!(
            "<img fileid=\"{}\" imgshow=\"{}\"",
            entity::encode(&caps[1]),
            &caps[2]
        );
        if let Some(desc) = caps.get(3) {
            tag.push_str(&format!(" imgdes=\"{}\"", entity::encode(desc.as_str())));
        }
        tag.push_str("/>");
        tag
    })
}

#[derive(Debug)]
struct Tag {
    close: bool,
    self_closing: bool,
    name: String,
    attrs: Vec<(String, String)>,
}

#[derive(Debug)]
enum Token {
    Tag(Tag),
    Text(String),
}

/// Splits the input into recognized tags and verbatim text runs.
///
/// A `<` that does not open a structurally valid tag with a known name is
/// ordinary text; so is everything around it.
fn scan(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = input;
    while let Some(pos) = rest.find('<') {
        text.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match read_tag(rest) {
            Some((tag, len)) if is_known(&tag.name) => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Tag(tag));
                rest = &rest[len..];
            }
            _ => {
                text.push('<');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}

/// Reads one tag at the start of `s` (which begins with `<`), returning it
/// with its byte length, or `None` when the shape is not a tag at all.
fn read_tag(s: &str) -> Option<(Tag, usize)> {
    let bytes = s.as_bytes();
    let mut i = 1;
    let close = bytes.get(1) == Some(&b'/');
    if close {
        i += 1;
    }
    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = s[name_start..i].to_string();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>') {
            self_closing = true;
            i += 2;
            break;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }
        if close {
            return None;
        }
        let key_start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b'_')
        {
            i += 1;
        }
        if i == key_start || bytes.get(i) != Some(&b'=') {
            return None;
        }
        let key = s[key_start..i].to_string();
        i += 1;
        if bytes.get(i) != Some(&b'"') {
            return None;
        }
        i += 1;
        let val_start = i;
        while i < bytes.len() && bytes[i] != b'"' {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        attrs.push((key, s[val_start..i].to_string()));
        i += 1;
    }
    Some((
        Tag {
            close,
            self_closing,
            name,
            attrs,
        },
        i,
    ))
}

/// Emits a token slice, applying the block-level rules: whitespace between
/// blocks goes away, blocks with blank content go away, everything kept is
/// re-rendered canonically. Reused for quote interiors, where the same rules
/// apply to the nested paragraphs.
fn emit(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Text(t) => {
                if !t.trim().is_empty() {
                    out.push_str(t);
                }
                i += 1;
            }
            Token::Tag(tag) => {
                if tag.close || is_void(&tag.name) {
                    render_tag(&mut out, tag);
                    i += 1;
                } else if is_paired_block(&tag.name) {
                    if tag.self_closing {
                        // An explicitly empty block; same fate as a blank one.
                        i += 1;
                        continue;
                    }
                    match find_close(tokens, i + 1, &tag.name) {
                        None => {
                            render_tag(&mut out, tag);
                            i += 1;
                        }
                        Some(j) => {
                            emit_block(&mut out, tag, &tokens[i + 1..j]);
                            i = j + 1;
                        }
                    }
                } else {
                    render_tag(&mut out, tag);
                    i += 1;
                }
            }
        }
    }
    out
}

fn emit_block(out: &mut String, open: &Tag, inner: &[Token]) {
    if open.name == "quote" {
        let body = emit(inner);
        if body.is_empty() {
            return;
        }
        render_tag(out, open);
        out.push_str(&body);
        render_close(out, &open.name);
        return;
    }
    if content_is_blank(inner) {
        return;
    }
    render_tag(out, open);
    for tok in inner {
        match tok {
            // Whitespace here is part of the note's text; keep every byte.
            Token::Text(t) => out.push_str(t),
            Token::Tag(t) => render_tag(out, t),
        }
    }
    render_close(out, &open.name);
}

fn content_is_blank(inner: &[Token]) -> bool {
    inner
        .iter()
        .all(|t| matches!(t, Token::Text(s) if s.trim().is_empty()))
}

/// Finds the matching close tag for `name`, honoring same-name nesting.
fn find_close(tokens: &[Token], from: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (j, tok) in tokens.iter().enumerate().skip(from) {
        if let Token::Tag(t) = tok
            && t.name == name
        {
            if t.close {
                if depth == 0 {
                    return Some(j);
                }
                depth -= 1;
            } else if !t.self_closing {
                depth += 1;
            }
        }
    }
    None
}

fn render_tag(out: &mut String, tag: &Tag) {
    if tag.close {
        render_close(out, &tag.name);
        return;
    }
    let mut attrs: Vec<(String, String)> = tag
        .attrs
        .iter()
        .filter(|(k, _)| k != "width" && k != "height")
        .filter(|(k, v)| !(k == "imgdes" && v.is_empty()))
        .map(|(k, v)| (k.clone(), canonical_value(v)))
        .collect();
    attrs.sort_by(|a, b| a.0.cmp(&b.0));

    out.push('<');
    out.push_str(&tag.name);
    for (k, v) in &attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(v);
        out.push('"');
    }
    if tag.self_closing || is_void(&tag.name) {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

fn render_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Canonical attribute value: numeric booleans, no leading zeros.
fn canonical_value(v: &str) -> String {
    match v {
        "true" => return "1".to_string(),
        "false" => return "0".to_string(),
        _ => {}
    }
    if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = v.trim_start_matches('0');
        if stripped.is_empty() {
            return "0".to_string();
        }
        return stripped.to_string();
    }
    v.to_string()
}
