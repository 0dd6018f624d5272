use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sprig_dom::TagData;

use crate::error::CleanError;

/// Tag names dropped by the default policy.
pub const DEFAULT_TAG_DENY: [&str; 8] = [
    "script",
    "noscript",
    "style",
    "aside",
    "header",
    "footer",
    "nav",
    "navigation",
];

/// `id`/`class` tokens dropped by the default policy.
pub const DEFAULT_ATTR_DENY: [&str; 7] = [
    "menu",
    "head",
    "header",
    "footer",
    "foot",
    "nav",
    "navigation",
];

/// Which subtrees the pruner removes.
///
/// Policies are plain values passed to every call; nothing is shared
/// between calls. Fields missing from a serialized policy fall back to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalPolicy {
    /// Tag names whose whole subtree is dropped.
    pub tag_deny: BTreeSet<String>,
    /// Tokens that drop a subtree when found in its `id` or `class`.
    pub attr_deny: BTreeSet<String>,
}

impl RemovalPolicy {
    /// Build a policy from arbitrary sets.
    pub fn new<T, A>(tag_deny: T, attr_deny: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            tag_deny: tag_deny.into_iter().map(Into::into).collect(),
            attr_deny: attr_deny.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that removes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tag_deny: BTreeSet::new(),
            attr_deny: BTreeSet::new(),
        }
    }

    /// Decode a policy from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Policy`] on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, CleanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a tag with this data is removed together with its subtree.
    #[must_use]
    pub fn denies(&self, data: &TagData) -> bool {
        self.tag_deny.contains(&data.name)
            || data
                .id_tokens()
                .chain(data.class_tokens())
                .any(|token| self.attr_deny.contains(token))
    }
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_DENY, DEFAULT_ATTR_DENY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, attrs: &[(&str, &str)]) -> TagData {
        TagData::new(name, attrs.iter().copied())
    }

    #[test]
    fn test_default_policy() {
        let policy = RemovalPolicy::default();
        assert_eq!(policy.tag_deny.len(), 8);
        assert_eq!(policy.attr_deny.len(), 7);
        assert!(policy.denies(&tag("nav", &[])));
        assert!(policy.denies(&tag("div", &[("class", "top menu")])));
        assert!(!policy.denies(&tag("div", &[("class", "content")])));
    }

    #[test]
    fn test_only_id_and_class_are_checked() {
        let policy = RemovalPolicy::default();
        assert!(!policy.denies(&tag("div", &[("title", "menu")])));
        assert!(policy.denies(&tag("div", &[("id", "head")])));
    }

    #[test]
    fn test_empty_policy_denies_nothing() {
        let policy = RemovalPolicy::empty();
        assert!(!policy.denies(&tag("script", &[("id", "menu")])));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let policy = RemovalPolicy::from_json(r#"{"tag_deny": ["table"]}"#).unwrap();
        assert!(policy.tag_deny.contains("table"));
        assert!(!policy.tag_deny.contains("script"));
        assert_eq!(policy.attr_deny, RemovalPolicy::default().attr_deny);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = RemovalPolicy::from_json("{\"tag_deny\": 3}").unwrap_err();
        assert!(matches!(err, CleanError::Policy(_)));
    }
}
