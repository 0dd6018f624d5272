use strum_macros::{Display, EnumIter, EnumString};

/// Elements defined never to carry an end tag.
///
/// The table is fixed rather than inferred from the stream: the tokenizer
/// cannot tell a self-terminating element from an unterminated one by syntax
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoidElement {
    /// `<area>`
    Area,
    /// `<base>`
    Base,
    /// `<br>`
    Br,
    /// `<col>`
    Col,
    /// `<command>`
    Command,
    /// `<embed>`
    Embed,
    /// `<hr>`
    Hr,
    /// `<img>`
    Img,
    /// `<input>`
    Input,
    /// `<keygen>`
    Keygen,
    /// `<link>`
    Link,
    /// `<menuitem>`
    Menuitem,
    /// `<meta>`
    Meta,
    /// `<param>`
    Param,
    /// `<source>`
    Source,
    /// `<wbr>`
    Wbr,
}

/// Whether `name` is in the void-element table. Names are matched exactly;
/// case folding is the tokenizer's job.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    name.parse::<VoidElement>().is_ok()
}
