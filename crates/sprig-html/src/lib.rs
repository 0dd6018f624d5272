//! Markup tokenizer and tree builder for sprig.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - lexes raw markup into start tag, end tag and text tokens
//!   - Tag, attribute and self-closing states
//!   - Comment, declaration and CDATA skipping
//!   - Raw text content for `script` and `style`
//!   - Character reference decoding
//!
//! - **Tree Builder** - turns the flat token stream into a [`sprig_dom::Tree`]
//!   - Stack of open ancestors with a cursor
//!   - Fixed void-element table
//!   - Forced close of unterminated elements at end of stream
//!
//! # Not Implemented
//!
//! - Implicit tag insertion and the other HTML error-recovery heuristics
//! - Incremental output

/// Tree construction from a token stream.
pub mod builder;
/// Tokenizer for converting raw markup into tokens.
pub mod tokenizer;

pub use builder::{
    BuildError, BuildErrorKind, BuildIssue, IssueKind, TreeBuilder, VoidElement, build_tree,
    build_tree_with_issues, is_void_element, parse_html,
};
pub use tokenizer::{Attribute, HTMLTokenizer, ParseIssue, Token, tokenize};
