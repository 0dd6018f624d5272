//! Pruning and text extraction over sprig trees.
//!
//! A built [`Tree`] is cleaned in two steps:
//! - [`prune`] drops whole subtrees whose tag name or `id`/`class` tokens
//!   are denied by a [`RemovalPolicy`]
//! - [`extract_text`] flattens what is left into normalized plain text
//!
//! [`clean_text`] runs the full pipeline on raw markup.

/// Errors raised by the cleaning pipeline.
pub mod error;
/// Plain-text extraction.
pub mod extract;
/// Removal policies.
pub mod policy;
/// Subtree pruning.
pub mod prune;

pub use error::CleanError;
pub use extract::{extract_text, node_text};
pub use policy::{DEFAULT_ATTR_DENY, DEFAULT_TAG_DENY, RemovalPolicy};
pub use prune::{prune, prune_node};

use sprig_dom::Tree;
use sprig_html::parse_html;

/// Parse markup, prune it with the default policy and extract its text.
///
/// # Errors
///
/// Fails with [`CleanError::Build`] if the markup is structurally broken.
pub fn clean_text(html: &str) -> Result<String, CleanError> {
    clean_text_with(html, &RemovalPolicy::default())
}

/// Like [`clean_text`] with an explicit policy.
///
/// # Errors
///
/// Fails with [`CleanError::Build`] if the markup is structurally broken.
pub fn clean_text_with(html: &str, policy: &RemovalPolicy) -> Result<String, CleanError> {
    let mut tree: Tree = parse_html(html)?;
    let _ = prune(&mut tree, policy);
    Ok(extract_text(&tree))
}
