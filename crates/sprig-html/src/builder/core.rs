use sprig_common::warning::warn_once;
use sprig_dom::{DomError, NodeId, TagData, Tree};

use super::error::{BuildError, BuildIssue, IssueKind};
use super::void::is_void_element;
use crate::tokenizer::{Attribute, Token};

/// Builds a [`Tree`] from a flat token stream.
///
/// The builder keeps a cursor on the node currently receiving children and a
/// stack of its still-open ancestors. The root sits at the bottom of that
/// stack and is never popped off it.
#[derive(Debug)]
pub struct TreeBuilder {
    /// Tree under construction. `NodeId::ROOT` is the synthetic `root` tag.
    tree: Tree,

    /// The node currently receiving new children.
    cursor: NodeId,

    /// Open ancestors of the cursor, root first.
    path: Vec<NodeId>,

    /// Position of the token being processed.
    token_index: usize,

    /// Malformed input that was tolerated.
    issues: Vec<BuildIssue>,
}

impl TreeBuilder {
    /// Create a builder holding an empty tree (root only).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            cursor: NodeId::ROOT,
            path: Vec::new(),
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// The node currently receiving new children.
    #[must_use]
    pub const fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Open ancestors of the cursor, root first.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// The tree as built so far.
    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Malformed input tolerated so far.
    #[must_use]
    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    /// Apply one token.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::MismatchedClose`] when an end tag does not
    /// match the cursor, or with [`BuildError::StackUnderflow`] when an end
    /// tag closes the root.
    pub fn process_token(&mut self, token: &Token) -> Result<(), BuildError> {
        match token {
            Token::StartTag { name, attributes } => self.insert_tag(name, attributes)?,
            Token::Text { data } => self.insert_text(data)?,
            Token::EndTag { name } => {
                // Void elements never consume an end tag, even a present one.
                if is_void_element(name) {
                    self.issues.push(BuildIssue {
                        kind: IssueKind::IgnoredVoidEndTag,
                        tag_name: name.clone(),
                        token_index: self.token_index,
                    });
                } else {
                    self.close_node(name)?;
                }
            }
        }
        self.token_index += 1;
        Ok(())
    }

    /// Finish the build at end of input.
    ///
    /// Elements still open are force-closed innermost first, then the root
    /// is closed and the tree is checked.
    ///
    /// # Errors
    ///
    /// Fails if a forced close cannot be applied, or with
    /// [`BuildError::UnclosedRoot`] if the root is still open afterwards.
    pub fn finish(self) -> Result<Tree, BuildError> {
        self.finish_with_issues().map(|(tree, _)| tree)
    }

    /// Like [`Self::finish`], also returning the tolerated issues.
    ///
    /// # Errors
    ///
    /// See [`Self::finish`].
    pub fn finish_with_issues(mut self) -> Result<(Tree, Vec<BuildIssue>), BuildError> {
        while !self.tree.is_closed(NodeId::ROOT) {
            if self.cursor != NodeId::ROOT {
                let tag_name = self.cursor_name();
                warn_once("Tree Builder", "unclosed element closed at end of input");
                self.issues.push(BuildIssue {
                    kind: IssueKind::ForcedClose,
                    tag_name,
                    token_index: self.token_index,
                });
            }
            self.self_close()?;
        }
        self.check_sanity()?;
        Ok((self.tree, self.issues))
    }

    /// Name of the tag under the cursor.
    fn cursor_name(&self) -> String {
        self.tree
            .as_tag(self.cursor)
            .map(|data| data.name.clone())
            .unwrap_or_default()
    }

    /// Open a new tag as the last child of the cursor and move the cursor
    /// onto it. Void elements are closed straight away.
    fn insert_tag(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), BuildError> {
        let data = TagData::new(
            name,
            attributes
                .iter()
                .map(|attr| (attr.name.as_str(), attr.value.as_str())),
        );
        let id = self.tree.alloc_tag(data);
        self.tree.append_child(self.cursor, id)?;
        self.path.push(self.cursor);
        self.cursor = id;

        if is_void_element(name) {
            self.self_close()?;
        }
        Ok(())
    }

    /// Append stripped text to the cursor. Blank text produces no node and
    /// the cursor does not move.
    fn insert_text(&mut self, data: &str) -> Result<(), BuildError> {
        let text = data.trim();
        if text.is_empty() {
            return Ok(());
        }
        let id = self.tree.alloc_text(text);
        self.tree.append_child(self.cursor, id)?;
        Ok(())
    }

    /// Close the cursor on an end tag and return to its parent.
    ///
    /// The already-closed check runs before the name check, so a stray end
    /// tag reaching the open root reports a mismatch rather than an underflow.
    fn close_node(&mut self, name: &str) -> Result<(), BuildError> {
        let open = self.cursor_name();
        if self.tree.is_closed(self.cursor) || name != open {
            return Err(BuildError::MismatchedClose {
                open,
                found: Some(name.to_string()),
                token_index: self.token_index,
            });
        }
        let parent = self.path.last().copied().ok_or(BuildError::StackUnderflow {
            token_index: self.token_index,
        })?;
        self.close_cursor(Some(name))?;
        let _ = self.path.pop();
        self.cursor = parent;
        Ok(())
    }

    /// Close the cursor without an end tag (void elements and end of input).
    ///
    /// Closing the root stops there; any other node returns the cursor to
    /// its parent.
    fn self_close(&mut self) -> Result<(), BuildError> {
        if self.tree.is_closed(self.cursor) {
            return Err(BuildError::MismatchedClose {
                open: self.cursor_name(),
                found: None,
                token_index: self.token_index,
            });
        }
        if self.cursor == NodeId::ROOT {
            return self.close_cursor(None);
        }
        let parent = self.path.last().copied().ok_or(BuildError::StackUnderflow {
            token_index: self.token_index,
        })?;
        self.close_cursor(None)?;
        let _ = self.path.pop();
        self.cursor = parent;
        Ok(())
    }

    fn close_cursor(&mut self, found: Option<&str>) -> Result<(), BuildError> {
        self.tree.close(self.cursor).map_err(|err| match err {
            DomError::AlreadyClosed(_) => BuildError::MismatchedClose {
                open: self.cursor_name(),
                found: found.map(str::to_string),
                token_index: self.token_index,
            },
            other => BuildError::Dom(other),
        })
    }

    /// The tree is sane once its root is closed.
    fn check_sanity(&self) -> Result<(), BuildError> {
        if self.tree.is_closed(NodeId::ROOT) {
            Ok(())
        } else {
            Err(BuildError::UnclosedRoot)
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
