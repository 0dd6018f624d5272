//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission, including the text buffer and attributes
//! - Input preprocessing for escaped markup

use sprig_common::warning::warn_once;

use super::character_reference::decode_reference;
use super::core::{HTMLTokenizer, ParseIssue, TokenizerState};
use super::token::{Attribute, Token};

/// Elements whose content is read as raw text up to the matching end tag.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Normalize raw markup before tokenization.
///
/// - Blank space directly after `<` is removed, so `< div>` reads as `<div>`.
/// - Backslash-escaped markup, as found inside JSON or script strings, is
///   unescaped: `\/` becomes `/` and `\"` becomes `"`.
#[must_use]
pub fn preprocess(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                output.push('<');
                while chars.next_if_eq(&' ').is_some() {}
            }
            '\\' => match chars.peek() {
                Some(&next) if next == '/' || next == '"' => {
                    output.push(next);
                    let _ = chars.next();
                }
                _ => output.push('\\'),
            },
            _ => output.push(c),
        }
    }
    output
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main
    /// loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// "If the next few characters are..."
    ///
    /// Compares against the input following the current character.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Same as [`Self::next_few_characters_are`] with ASCII case-insensitive
    /// comparison.
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..self.current_pos + target.len())
            .is_some_and(|next| next.eq_ignore_ascii_case(target))
    }

    /// Consume the given ASCII string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// Decode the character reference following a consumed `&`.
    ///
    /// Returns the replacement text, or a literal `&` when nothing matches.
    pub(super) fn consume_character_reference(&mut self) -> String {
        match decode_reference(&self.input[self.current_pos..]) {
            Some(decoded) => {
                self.current_pos += decoded.consumed;
                decoded.text
            }
            None => {
                let named = self.input[self.current_pos..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphanumeric());
                if named {
                    self.log_parse_error("unknown character reference kept as text");
                }
                "&".to_string()
            }
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Emit the buffered character data as a single text token.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(Token::text(data));
        }
    }

    /// "Emit the current token"
    ///
    /// A start tag with the self-closing flag is followed by a synthetic end
    /// tag of the same name. A start tag for a raw text element switches the
    /// tokenizer to the raw text state.
    pub(super) fn emit_token(&mut self) {
        self.finish_attribute();
        let Some(token) = self.current_token.take() else {
            return;
        };
        let self_closing = std::mem::take(&mut self.self_closing);
        let raw_text_name = match &token {
            Token::StartTag { name, .. }
                if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) =>
            {
                Some(name.clone())
            }
            _ => None,
        };
        let end_tag = match &token {
            Token::StartTag { name, .. } if self_closing => Some(Token::end_tag(name.clone())),
            _ => None,
        };

        self.token_stream.push(token);
        if let Some(end_tag) = end_tag {
            self.token_stream.push(end_tag);
        }
        if let Some(name) = raw_text_name {
            self.raw_text_element = Some(name);
            self.switch_to(TokenizerState::RawText);
        } else {
            self.switch_to(TokenizerState::Data);
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_attribute();
        self.current_attribute = Some(Attribute::new(String::new(), String::new()));
    }

    /// Move the attribute under construction onto the current token.
    pub(super) fn finish_attribute(&mut self) {
        let Some(attribute) = self.current_attribute.take() else {
            return;
        };
        let Some(token) = self.current_token.as_mut() else {
            return;
        };
        if !token.push_attribute(attribute) {
            self.log_parse_error("duplicate attribute, later value kept");
        }
    }

    /// Append to the name of the attribute under construction.
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.name.push(c.to_ascii_lowercase());
        }
    }

    /// Append to the value of the attribute under construction.
    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.value.push_str(s);
        }
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag is discarded.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_parse_error("end of input inside a tag");
        self.current_token = None;
        self.current_attribute = None;
        self.self_closing = false;
        self.reconsume_in(TokenizerState::Data);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// Parse errors are not fatal: the tokenizer recovers and continues.
    ///
    /// The position is kept in [`HTMLTokenizer::issues`]; the warning itself
    /// carries only the message.
    pub(super) fn log_parse_error(&mut self, message: &'static str) {
        self.issues.push(ParseIssue {
            message,
            position: self.current_pos,
        });
        warn_once("Tokenizer", message);
    }
}
