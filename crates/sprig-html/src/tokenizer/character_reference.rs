//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Covers numeric references and the named entities that show up in real
//! text content. The full table defines 2,231 entities; unknown names are
//! left in the text as written.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Named entities, keyed without the leading `&`.
///
/// Keys without a trailing semicolon are the legacy forms that also match
/// when the semicolon is missing (`&amp` reads as `&amp;`).
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
        ("copy;", "\u{00A9}"),
        ("copy", "\u{00A9}"),
        ("reg;", "\u{00AE}"),
        ("reg", "\u{00AE}"),
        ("trade;", "\u{2122}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("hellip;", "\u{2026}"),
        ("bull;", "\u{2022}"),
        ("middot;", "\u{00B7}"),
        ("lsquo;", "\u{2018}"),
        ("rsquo;", "\u{2019}"),
        ("ldquo;", "\u{201C}"),
        ("rdquo;", "\u{201D}"),
        ("laquo;", "\u{00AB}"),
        ("raquo;", "\u{00BB}"),
        ("cent;", "\u{00A2}"),
        ("pound;", "\u{00A3}"),
        ("euro;", "\u{20AC}"),
        ("yen;", "\u{00A5}"),
        ("times;", "\u{00D7}"),
        ("divide;", "\u{00F7}"),
        ("plusmn;", "\u{00B1}"),
        ("deg;", "\u{00B0}"),
        ("frac12;", "\u{00BD}"),
        ("sect;", "\u{00A7}"),
        ("para;", "\u{00B6}"),
        ("shy;", "\u{00AD}"),
        ("ensp;", "\u{2002}"),
        ("emsp;", "\u{2003}"),
        ("thinsp;", "\u{2009}"),
        ("zwnj;", "\u{200C}"),
        ("zwj;", "\u{200D}"),
        ("eacute;", "\u{00E9}"),
        ("egrave;", "\u{00E8}"),
        ("agrave;", "\u{00E0}"),
        ("aacute;", "\u{00E1}"),
        ("ccedil;", "\u{00E7}"),
        ("ouml;", "\u{00F6}"),
        ("uuml;", "\u{00FC}"),
        ("auml;", "\u{00E4}"),
        ("szlig;", "\u{00DF}"),
    ])
});

/// Longest entity name in the table, semicolon included.
const MAX_NAME_LEN: usize = 8;

/// A decoded reference and the number of bytes it occupied after the `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReference {
    /// Replacement text.
    pub text: String,
    /// Bytes consumed from the input following the `&`.
    pub consumed: usize,
}

/// Try to decode the character reference that starts right after a `&`.
///
/// `rest` is the input following the ampersand. Returns `None` when no
/// reference matches, in which case the ampersand is literal text.
#[must_use]
pub fn decode_reference(rest: &str) -> Option<DecodedReference> {
    if let Some(numeric) = rest.strip_prefix('#') {
        return decode_numeric(numeric).map(|(c, len)| DecodedReference {
            text: c.to_string(),
            consumed: len + 1,
        });
    }
    decode_named(rest)
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
fn decode_numeric(rest: &str) -> Option<(char, usize)> {
    let (digits_start, radix) = match rest.chars().next() {
        Some('x' | 'X') => (1, 16),
        _ => (0, 10),
    };
    let digits: String = rest[digits_start..]
        .chars()
        .take_while(|c| c.is_digit(radix))
        .collect();
    if digits.is_empty() {
        return None;
    }
    let mut consumed = digits_start + digits.len();
    if rest[consumed..].starts_with(';') {
        consumed += 1;
    }

    // Out-of-range values, surrogates and NULL decode to U+FFFD.
    let c = u32::from_str_radix(&digits, radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
        .unwrap_or('\u{FFFD}');
    Some((c, consumed))
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the named character references
/// table."
fn decode_named(rest: &str) -> Option<DecodedReference> {
    let candidate: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == ';')
        .take(MAX_NAME_LEN)
        .collect();
    (1..=candidate.len()).rev().find_map(|len| {
        let name = &candidate[..len];
        NAMED_ENTITIES.get(name).map(|text| DecodedReference {
            text: (*text).to_string(),
            consumed: len,
        })
    })
}
