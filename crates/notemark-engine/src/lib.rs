//! # notemark-engine
//!
//! Bidirectional codec between the rich-text note markup format and its
//! in-memory AST, plus a text-level normalizer for semantic equality checks.
//!
//! Three independent paths over the same grammar:
//!
//! ```text
//! markup ──parse──▶ Document ──generate──▶ markup   (canonical)
//! markup ──normalize──▶ markup                      (comparable)
//! ```
//!
//! [`parse`] is the only fallible entry point and fails atomically with a
//! [`ParseError`]. [`generate`] is `parse`'s semantic inverse over documents
//! it produced, with one documented exception: legacy-format images are
//! canonicalized to the current `<img/>` form. [`normalize`] never touches
//! the AST so it can cope with partially malformed legacy notes.
//!
//! Everything is pure and synchronous over immutable input; all lookup
//! tables are immutable constants, so every entry point is safe to call
//! concurrently.

pub mod ast;
pub mod entity;
pub mod generate;
pub mod normalize;
pub mod parsing;

pub use ast::{BlockNode, Document, FormatKind, ImageBlock, InlineNode, TextBlock};
pub use generate::generate;
pub use normalize::normalize;
pub use parsing::{ParseError, parse};
