use crate::entity;

use super::cursor::Cursor;
use super::error::ParseError;

/// How a tag's attribute list ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagEnd {
    /// `>` — content follows, up to the matching close tag.
    Open,
    /// `/>` — the tag carries no content.
    SelfClosing,
}

/// The parsed attribute list of one tag, with typed access.
///
/// Values are entity-decoded at construction. Unknown keys are retained but
/// simply never asked for, which is how the grammar ignores them.
#[derive(Debug)]
pub(super) struct Attrs {
    tag: String,
    offset: usize,
    pairs: Vec<(String, String)>,
}

/// Parses `key="value"` pairs up to the closing `>` or `/>`.
///
/// `tag`/`offset` identify the owning tag for error reporting.
pub(super) fn parse_attrs(
    cur: &mut Cursor<'_>,
    tag: &str,
    offset: usize,
) -> Result<(Attrs, TagEnd), ParseError> {
    let mut pairs = Vec::new();
    loop {
        cur.skip_ws();
        if cur.eat(b"/>") {
            return Ok((Attrs::new(tag, offset, pairs), TagEnd::SelfClosing));
        }
        if cur.eat(b">") {
            return Ok((Attrs::new(tag, offset, pairs), TagEnd::Open));
        }
        if cur.eof() {
            return Err(ParseError::UnterminatedTag {
                tag: tag.to_string(),
                offset,
            });
        }

        let key_offset = cur.pos();
        let key = cur
            .take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
            .to_string();
        if key.is_empty() {
            return Err(ParseError::InvalidAttributeValue {
                tag: tag.to_string(),
                attr: cur.peek_char().map(String::from).unwrap_or_default(),
                offset: key_offset,
            });
        }
        if !cur.eat(b"=") || !cur.eat(b"\"") {
            return Err(ParseError::InvalidAttributeValue {
                tag: tag.to_string(),
                attr: key,
                offset: key_offset,
            });
        }
        let value = cur.take_while(|b| b != b'"');
        if !cur.eat(b"\"") {
            return Err(ParseError::UnterminatedTag {
                tag: tag.to_string(),
                offset,
            });
        }
        pairs.push((key, entity::decode(value)));
    }
}

impl Attrs {
    fn new(tag: &str, offset: usize, pairs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.to_string(),
            offset,
            pairs,
        }
    }

    /// The first value recorded for `key`, if any.
    pub(super) fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// A non-negative integer attribute. Absent is `None`; present but
    /// non-numeric is an error.
    pub(super) fn uint(&self, key: &str) -> Result<Option<u32>, ParseError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => {
                if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(self.invalid(key));
                }
                v.parse::<u32>().map(Some).map_err(|_| self.invalid(key))
            }
        }
    }

    /// Like [`Attrs::uint`] but with a default for an absent attribute.
    pub(super) fn uint_or(&self, key: &str, default: u32) -> Result<u32, ParseError> {
        Ok(self.uint(key)?.unwrap_or(default))
    }

    /// A strict boolean attribute: exactly `"true"` or `"false"`, defaulting
    /// to false when absent.
    pub(super) fn flag(&self, key: &str) -> Result<bool, ParseError> {
        match self.get(key) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(_) => Err(self.invalid(key)),
        }
    }

    /// A required string attribute.
    pub(super) fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key).ok_or_else(|| self.invalid(key))
    }

    pub(super) fn invalid(&self, attr: &str) -> ParseError {
        ParseError::InvalidAttributeValue {
            tag: self.tag.clone(),
            attr: attr.to_string(),
            offset: self.offset,
        }
    }
}
