//! Markup tree for sprig.
//!
//! This crate provides the node model shared by the tree builder, the pruner
//! and the text extractor.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Every node is owned by exactly one [`Tree`]; parents refer to children by
//! index, so there is no shared ownership and no cycles. Pruning detaches
//! subtrees from their parent's child list; detached nodes stay in the arena
//! but are no longer reachable from the root.

use std::collections::{BTreeMap, BTreeSet};

use strum_macros::Display;
use thiserror::Error;

/// Rendering of a tree as an indented, human-readable dump.
pub mod render;

pub use render::render;

/// Set of whitespace-separated tokens taken from one attribute value.
pub type TokenSet = BTreeSet<String>;

/// Map of attribute names to the token sets of their values.
pub type AttributesMap = BTreeMap<String, TokenSet>;

/// Tag name of the synthetic node at the top of every tree.
pub const ROOT_TAG_NAME: &str = "root";

/// A type-safe index into a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Construction status of a tag node.
///
/// A node that was never created has no status at all: its id is simply not
/// present in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeStatus {
    /// The node still accepts children.
    Open,
    /// A matching end tag or a self-close was applied. No further mutation.
    Closed,
}

/// Errors raised by structural mutations on a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not refer to a node of this tree.
    #[error("node {0:?} does not exist")]
    Missing(NodeId),
    /// Children can only be appended to tag nodes.
    #[error("node {0:?} is a text node and cannot have children")]
    NotATag(NodeId),
    /// The parent was already closed when a child was appended.
    #[error("node {0:?} is closed and accepts no further children")]
    Closed(NodeId),
    /// The node was closed twice.
    #[error("node {0:?} is already closed")]
    AlreadyClosed(NodeId),
}

/// Tag-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    /// Tag name, as normalized by the tokenizer.
    pub name: String,
    /// Attribute name to value-token set.
    pub attrs: AttributesMap,
    /// Whether the tag has been closed.
    pub status: NodeStatus,
}

impl TagData {
    /// Create an open tag from raw `(name, value)` attribute pairs.
    ///
    /// Each value is split on whitespace into a token set, so
    /// `class="menu main"` becomes `{"main", "menu"}`. When an attribute name
    /// repeats, the later value wins.
    pub fn new<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let attrs = attributes
            .into_iter()
            .map(|(key, value)| (key.into(), split_tokens(value.as_ref())))
            .collect();
        Self {
            name: name.into(),
            attrs,
            status: NodeStatus::Open,
        }
    }

    /// Returns the token set of the given attribute, if present.
    #[must_use]
    pub fn attribute_tokens(&self, name: &str) -> Option<&TokenSet> {
        self.attrs.get(name)
    }

    /// Tokens of the `id` attribute (empty if absent).
    pub fn id_tokens(&self) -> impl Iterator<Item = &str> {
        self.attrs.get("id").into_iter().flatten().map(String::as_str)
    }

    /// Tokens of the `class` attribute (empty if absent).
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Returns true once the tag has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }
}

/// Split an attribute value into its whitespace-separated tokens.
#[must_use]
pub fn split_tokens(value: &str) -> TokenSet {
    value.split_whitespace().map(str::to_string).collect()
}

/// The two node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element with a name, attributes and children.
    Tag(TagData),
    /// Literal text. Always a leaf, always closed.
    Text(String),
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Tag or text payload.
    pub node_type: NodeType,
    /// Parent node, `None` for the root and for nodes not yet attached.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Distance from the root. The root has depth 0.
    pub depth: usize,
}

impl Node {
    /// Text nodes are always closed; tag nodes are closed once their end tag
    /// (or a self-close) has been applied.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match &self.node_type {
            NodeType::Tag(data) => data.is_closed(),
            NodeType::Text(_) => true,
        }
    }
}

/// Arena-based markup tree.
///
/// All nodes live in a contiguous vector and refer to each other by
/// [`NodeId`]. The synthetic root tag is always at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only the open `root` tag.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Tag(TagData::new(ROOT_TAG_NAME, Vec::<(String, String)>::new())),
            parent: None,
            children: Vec::new(),
            depth: 0,
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed from the arena.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes reachable from the root, the root included.
    #[must_use]
    pub fn reachable_len(&self) -> usize {
        self.descendants(NodeId::ROOT).count()
    }

    /// Allocate a detached, open tag node.
    pub fn alloc_tag(&mut self, data: TagData) -> NodeId {
        self.alloc(NodeType::Tag(data))
    }

    /// Allocate a detached text node.
    pub fn alloc_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(text.into()))
    }

    fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            depth: 0,
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child's depth becomes the parent's depth plus one.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown, if `parent` is a text node, or if
    /// `parent` has already been closed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(child).is_none() {
            return Err(DomError::Missing(child));
        }
        let parent_node = self.get(parent).ok_or(DomError::Missing(parent))?;
        match &parent_node.node_type {
            NodeType::Text(_) => return Err(DomError::NotATag(parent)),
            NodeType::Tag(data) if data.is_closed() => return Err(DomError::Closed(parent)),
            NodeType::Tag(_) => {}
        }
        let depth = parent_node.depth + 1;

        self.nodes[parent.0].children.push(child);
        let child_node = &mut self.nodes[child.0];
        child_node.parent = Some(parent);
        child_node.depth = depth;
        Ok(())
    }

    /// Mark a tag node as closed.
    ///
    /// # Errors
    ///
    /// Fails if the id is unknown, refers to a text node, or the tag is
    /// already closed.
    pub fn close(&mut self, id: NodeId) -> Result<(), DomError> {
        let node = self.nodes.get_mut(id.0).ok_or(DomError::Missing(id))?;
        match &mut node.node_type {
            NodeType::Text(_) => Err(DomError::NotATag(id)),
            NodeType::Tag(data) if data.is_closed() => Err(DomError::AlreadyClosed(id)),
            NodeType::Tag(data) => {
                data.status = NodeStatus::Closed;
                Ok(())
            }
        }
    }

    /// Keep only the children of `id` for which `keep` returns true,
    /// preserving their relative order. Dropped children are detached.
    ///
    /// Returns the number of detached children.
    pub fn retain_children<F>(&mut self, id: NodeId, mut keep: F) -> usize
    where
        F: FnMut(NodeId) -> bool,
    {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return 0;
        };
        let children = std::mem::take(&mut node.children);
        let (kept, dropped): (Vec<NodeId>, Vec<NodeId>) =
            children.into_iter().partition(|&child| keep(child));
        self.nodes[id.0].children = kept;
        for child in &dropped {
            self.nodes[child.0].parent = None;
        }
        dropped.len()
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Depth of a node (root is 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.get(id).map(|n| n.depth)
    }

    /// Get tag data if this node is a tag.
    #[must_use]
    pub fn as_tag(&self, id: NodeId) -> Option<&TagData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Tag(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Tag(_) => None,
        })
    }

    /// Whether a node is closed. Unknown ids are reported as not closed.
    #[must_use]
    pub fn is_closed(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_closed)
    }

    /// Iterate over `id` and every node reachable below it, in document
    /// (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        Descendants { tree: self, stack }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
