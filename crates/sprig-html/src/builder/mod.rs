//! Tree construction from a token stream.

/// The tree builder state machine.
pub mod core;
/// Structural errors and tolerated issues.
pub mod error;
/// The fixed table of void elements.
pub mod void;

pub use self::core::TreeBuilder;
pub use error::{BuildError, BuildErrorKind, BuildIssue, IssueKind};
pub use void::{VoidElement, is_void_element};

use sprig_dom::Tree;

use crate::tokenizer::{Token, tokenize};

/// Build a tree from a complete token stream.
///
/// # Errors
///
/// Returns the first structural error encountered; no partial tree is
/// produced.
pub fn build_tree<I>(tokens: I) -> Result<Tree, BuildError>
where
    I: IntoIterator<Item = Token>,
{
    build_tree_with_issues(tokens).map(|(tree, _)| tree)
}

/// Build a tree and also return the malformed input that was tolerated.
///
/// # Errors
///
/// Returns the first structural error encountered.
pub fn build_tree_with_issues<I>(tokens: I) -> Result<(Tree, Vec<BuildIssue>), BuildError>
where
    I: IntoIterator<Item = Token>,
{
    let mut builder = TreeBuilder::new();
    for token in tokens {
        builder.process_token(&token)?;
    }
    builder.finish_with_issues()
}

/// Tokenize raw markup and build its tree.
///
/// # Errors
///
/// Returns the first structural error encountered.
pub fn parse_html(input: &str) -> Result<Tree, BuildError> {
    build_tree(tokenize(input))
}
