use std::fmt;

/// An attribute on a start tag token: a name and its raw value.
///
/// The value is kept as written (after character reference decoding); the
/// tree builder splits it into a token set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, ASCII-lowercased.
    pub name: String,
    /// Raw attribute value. Empty when the attribute had no value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The events the tokenizer hands to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag, `<name attr="value">`.
    StartTag {
        /// Tag name, ASCII-lowercased.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
    },

    /// A closing tag, `</name>`.
    EndTag {
        /// Tag name, ASCII-lowercased.
        name: String,
    },

    /// A run of character data between tags.
    Text {
        /// Decoded text, whitespace preserved.
        data: String,
    },
}

impl Token {
    /// Create a start tag token.
    #[must_use]
    pub fn start_tag(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self::StartTag {
            name: name.into(),
            attributes,
        }
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// Create a text token.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text { data: data.into() }
    }

    /// Returns true if this is a start tag token.
    #[must_use]
    pub const fn is_start_tag(&self) -> bool {
        matches!(self, Self::StartTag { .. })
    }

    /// Returns true if this is an end tag token.
    #[must_use]
    pub const fn is_end_tag(&self) -> bool {
        matches!(self, Self::EndTag { .. })
    }

    /// Mutation helpers for use during tokenization. They are no-ops on
    /// token variants that do not carry the field.
    ///
    /// "Append the current input character to the current tag token's tag name."
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => {
                name.push(c.to_ascii_lowercase());
            }
            Self::Text { .. } => {}
        }
    }

    /// Add a finished attribute to a start tag.
    ///
    /// A repeated name is a duplicate-attribute parse error. The later value
    /// replaces the earlier one in place, so the attribute keeps its first
    /// position.
    ///
    /// Returns false when an earlier value was replaced.
    pub fn push_attribute(&mut self, attribute: Attribute) -> bool {
        match self {
            Self::StartTag { attributes, .. } => {
                if let Some(existing) = attributes.iter_mut().find(|a| a.name == attribute.name) {
                    existing.value = attribute.value;
                    return false;
                }
                attributes.push(attribute);
                true
            }
            // End tags carry no attributes.
            Self::EndTag { .. } | Self::Text { .. } => true,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag { name, attributes } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => {
                let display = data.replace('\n', "\\n").replace('\t', "\\t");
                write!(f, "Text(\"{display}\")")
            }
        }
    }
}
