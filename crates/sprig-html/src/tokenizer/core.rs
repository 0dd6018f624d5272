use strum_macros::Display;

use super::helpers::preprocess;
use super::token::{Attribute, Token};

/// The tokenizer state machine. States follow the naming of
/// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
/// reduced to what the tree builder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Content of `script` and `style`, read verbatim up to the matching end tag.
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// Also swallows DOCTYPE and processing instructions.
    BogusComment,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CDATASection,
}

/// A recoverable irregularity in the markup.
///
/// The message is one of a fixed set, so it is also what the warning channel
/// deduplicates on; the position stays with the tokenizer that saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was wrong.
    pub message: &'static str,
    /// Byte offset into the preprocessed input.
    pub position: usize,
}

/// Character-level tokenizer producing start tag, end tag and text tokens.
///
/// Comments, declarations and CDATA sections produce no tokens.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) current_attribute: Option<Attribute>,
    pub(super) self_closing: bool,
    pub(super) text_buffer: String,
    /// Name of the element whose raw text content is being read.
    pub(super) raw_text_element: Option<String>,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    pub(super) issues: Vec<ParseIssue>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// The input is preprocessed first (see [`preprocess`]).
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            state: TokenizerState::Data,
            input: preprocess(input),
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            current_attribute: None,
            self_closing: false,
            text_buffer: String::new(),
            raw_text_element: None,
            at_eof: false,
            token_stream: Vec::new(),
            issues: Vec::new(),
            reconsume: false,
        }
    }

    /// Tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Parse errors recovered from so far, in input order.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Run the state machine over the whole input.
    pub fn run(&mut self) {
        while !self.at_eof {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::RawText => self.handle_raw_text_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"');
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'');
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CDATASection => self.handle_cdata_section_state(),
            }
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            Some('&') => {
                let decoded = self.consume_character_reference();
                self.text_buffer.push_str(&decoded);
            }
            // "EOF - Emit an end-of-file token."
            None => {
                self.flush_text();
                self.at_eof = true;
            }
            Some(c) => self.text_buffer.push(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Everything up to the matching end tag is text, with no character
    /// reference decoding.
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_raw_text_end_tag() => {
                self.flush_text();
                self.raw_text_element = None;
                self.switch_to(TokenizerState::TagOpen);
            }
            None => {
                self.raw_text_element = None;
                self.reconsume_in(TokenizerState::Data);
            }
            Some(c) => self.text_buffer.push(c),
        }
    }

    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted."
    fn at_raw_text_end_tag(&self) -> bool {
        let Some(name) = &self.raw_text_element else {
            return false;
        };
        let closing = format!("/{name}");
        if !self.next_few_characters_are_case_insensitive(&closing) {
            return false;
        }
        match self.input[self.current_pos + closing.len()..].chars().next() {
            None | Some('/' | '>') => true,
            Some(c) => Self::is_whitespace_char(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => {
                self.flush_text();
                if self.next_few_characters_are("--") {
                    self.consume_string("--");
                    self.switch_to(TokenizerState::Comment);
                } else if self.next_few_characters_are("[CDATA[") {
                    self.consume_string("[CDATA[");
                    self.switch_to(TokenizerState::CDATASection);
                } else {
                    // DOCTYPE and other declarations carry nothing we keep.
                    self.switch_to(TokenizerState::BogusComment);
                }
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.flush_text();
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha - Create a new start tag token, set its tag name to
            // the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.flush_text();
                self.current_token = Some(Token::start_tag(String::new(), Vec::new()));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error."
            Some('?') => {
                self.flush_text();
                self.switch_to(TokenizerState::BogusComment);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            _ => {
                self.text_buffer.push('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::end_tag(String::new()));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing end tag name");
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - Emit a U+003C LESS-THAN SIGN character token, a U+002F
            // SOLIDUS character token and an end-of-file token."
            None => {
                self.text_buffer.push_str("</");
                self.reconsume_in(TokenizerState::Data);
            }
            _ => {
                self.log_parse_error("invalid first character of tag name");
                self.switch_to(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a
            // new attribute in the current tag token. Set that attribute's name
            // to the current input character."
            Some('=') => {
                self.log_parse_error("unexpected equals sign before attribute name");
                self.start_new_attribute();
                self.append_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            Some(c) => self.append_to_attribute_name(c),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "This is a missing-attribute-value parse error."
            Some('>') => {
                self.log_parse_error("missing attribute value");
                self.emit_token();
            }
            None => self.eof_in_tag(),
            Some(_) => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => {
                let decoded = self.consume_character_reference();
                self.append_to_attribute_value(&decoded);
            }
            None => self.eof_in_tag(),
            Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                let decoded = self.consume_character_reference();
                self.append_to_attribute_value(&decoded);
            }
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.finish_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => self.emit_token(),
            None => self.eof_in_tag(),
            // "This is a missing-whitespace-between-attributes parse error."
            Some(_) => {
                self.log_parse_error("missing whitespace between attributes");
                self.finish_attribute();
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "Set the self-closing flag of the current tag token. Switch to
            // the data state. Emit the current tag token."
            Some('>') => {
                self.self_closing = self.current_token.as_ref().is_some_and(Token::is_start_tag);
                self.emit_token();
            }
            None => self.eof_in_tag(),
            // "This is an unexpected-solidus-in-tag parse error."
            Some(_) => {
                self.log_parse_error("unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.switch_to(TokenizerState::Data),
            None => self.reconsume_in(TokenizerState::Data),
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.switch_to(TokenizerState::Data);
            }
            // "This is an eof-in-comment parse error."
            None => {
                self.log_parse_error("end of input inside a comment");
                self.reconsume_in(TokenizerState::Data);
            }
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// CDATA content is skipped.
    fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') if self.next_few_characters_are("]>") => {
                self.consume_string("]>");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_parse_error("end of input inside a CDATA section");
                self.reconsume_in(TokenizerState::Data);
            }
            Some(_) => {}
        }
    }
}
