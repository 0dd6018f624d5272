//! Tokenizer module.
//!
//! A small character-level state machine in the shape of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
//! reduced to the events the tree builder consumes.

/// Character reference decoding.
pub mod character_reference;
/// Tokenizer state machine implementation.
pub mod core;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, ParseIssue, TokenizerState};
pub use token::{Attribute, Token};

/// Tokenize a markup string in one call.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}
