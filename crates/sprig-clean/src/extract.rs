use sprig_dom::{NodeId, NodeType, Tree};

/// Raw text of the subtree at `id`, in document order.
///
/// A text node yields its text; a tag yields its children's text joined by
/// single spaces. Whitespace is left as is.
#[must_use]
pub fn node_text(tree: &Tree, id: NodeId) -> String {
    match tree.get(id).map(|node| &node.node_type) {
        Some(NodeType::Text(text)) => text.clone(),
        Some(NodeType::Tag(_)) => tree
            .children(id)
            .iter()
            .map(|&child| node_text(tree, child))
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    }
}

/// Normalized plain text of the whole tree.
///
/// Every run of whitespace becomes one space, and the result is trimmed.
#[must_use]
pub fn extract_text(tree: &Tree) -> String {
    collapse_whitespace(&node_text(tree, tree.root()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
