//! Tests for the arena tree: attachment, closing, traversal and rendering.

use sprig_dom::{DomError, NodeId, NodeStatus, NodeType, TagData, Tree, render, split_tokens};

/// Helper to allocate a tag without attributes.
fn alloc_tag(tree: &mut Tree, name: &str) -> NodeId {
    tree.alloc_tag(TagData::new(name, Vec::<(String, String)>::new()))
}

// ========== node model ==========

#[test]
fn test_new_tree_has_open_root() {
    let tree = Tree::new();
    let root = tree.as_tag(NodeId::ROOT).unwrap();

    assert_eq!(root.name, "root");
    assert!(root.attrs.is_empty());
    assert_eq!(root.status, NodeStatus::Open);
    assert_eq!(tree.depth(NodeId::ROOT), Some(0));
    assert_eq!(tree.reachable_len(), 1);
}

#[test]
fn test_attribute_values_split_into_token_sets() {
    let data = TagData::new("div", [("id", "menu  head"), ("class", "\tmain menu\n")]);

    let ids: Vec<&str> = data.id_tokens().collect();
    let classes: Vec<&str> = data.class_tokens().collect();
    assert_eq!(ids, ["head", "menu"]);
    assert_eq!(classes, ["main", "menu"]);
    assert!(data.attribute_tokens("style").is_none());
}

#[test]
fn test_repeated_attribute_keeps_later_value() {
    let data = TagData::new("p", [("class", "a"), ("class", "b c")]);
    assert_eq!(data.attribute_tokens("class"), Some(&split_tokens("c b")));
}

#[test]
fn test_empty_attribute_value_has_no_tokens() {
    let data = TagData::new("input", [("disabled", "")]);
    assert_eq!(data.attribute_tokens("disabled").map(|t| t.len()), Some(0));
}

// ========== append_child ==========

#[test]
fn test_append_child_sets_depth_and_parent() {
    let mut tree = Tree::new();
    let div = alloc_tag(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div).unwrap();
    let text = tree.alloc_text("hello");
    tree.append_child(div, text).unwrap();

    assert_eq!(tree.depth(div), Some(1));
    assert_eq!(tree.depth(text), Some(2));
    assert_eq!(tree.parent(text), Some(div));
    assert_eq!(tree.children(div), &[text]);
    assert_eq!(tree.as_text(text), Some("hello"));
    assert!(tree.is_closed(text));
}

#[test]
fn test_append_child_preserves_order() {
    let mut tree = Tree::new();
    let a = alloc_tag(&mut tree, "a");
    let b = alloc_tag(&mut tree, "b");
    let c = alloc_tag(&mut tree, "c");
    for id in [a, b, c] {
        tree.append_child(NodeId::ROOT, id).unwrap();
    }
    assert_eq!(tree.children(NodeId::ROOT), &[a, b, c]);
}

#[test]
fn test_append_to_closed_tag_fails() {
    let mut tree = Tree::new();
    let div = alloc_tag(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div).unwrap();
    tree.close(div).unwrap();

    let late = tree.alloc_text("late");
    assert_eq!(tree.append_child(div, late), Err(DomError::Closed(div)));
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_append_to_text_fails() {
    let mut tree = Tree::new();
    let text = tree.alloc_text("leaf");
    tree.append_child(NodeId::ROOT, text).unwrap();
    let span = alloc_tag(&mut tree, "span");
    assert_eq!(tree.append_child(text, span), Err(DomError::NotATag(text)));
}

#[test]
fn test_append_unknown_node_fails() {
    let mut tree = Tree::new();
    assert_eq!(
        tree.append_child(NodeId::ROOT, NodeId(42)),
        Err(DomError::Missing(NodeId(42)))
    );
}

// ========== close ==========

#[test]
fn test_close_twice_fails() {
    let mut tree = Tree::new();
    let p = alloc_tag(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p).unwrap();

    tree.close(p).unwrap();
    assert!(tree.is_closed(p));
    assert_eq!(tree.close(p), Err(DomError::AlreadyClosed(p)));
}

#[test]
fn test_close_text_node_fails() {
    let mut tree = Tree::new();
    let text = tree.alloc_text("x");
    assert_eq!(tree.close(text), Err(DomError::NotATag(text)));
}

// ========== retain_children / descendants ==========

#[test]
fn test_retain_children_detaches_and_keeps_order() {
    let mut tree = Tree::new();
    let ids: Vec<NodeId> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| alloc_tag(&mut tree, name))
        .collect();
    for &id in &ids {
        tree.append_child(NodeId::ROOT, id).unwrap();
    }

    let removed = tree.retain_children(NodeId::ROOT, |id| id != ids[1] && id != ids[3]);

    assert_eq!(removed, 2);
    assert_eq!(tree.children(NodeId::ROOT), &[ids[0], ids[2]]);
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.reachable_len(), 3);
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_descendants_in_document_order() {
    let mut tree = Tree::new();
    let div = alloc_tag(&mut tree, "div");
    let p = alloc_tag(&mut tree, "p");
    let text = tree.alloc_text("t");
    let span = alloc_tag(&mut tree, "span");
    tree.append_child(NodeId::ROOT, div).unwrap();
    tree.append_child(div, p).unwrap();
    tree.append_child(p, text).unwrap();
    tree.append_child(div, span).unwrap();

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![NodeId::ROOT, div, p, text, span]);
    assert!(matches!(
        tree.get(span).map(|n| &n.node_type),
        Some(NodeType::Tag(_))
    ));
}

// ========== render ==========

#[test]
fn test_render_root_only() {
    assert_eq!(render(&Tree::new()), "<root> : ");
}

#[test]
fn test_render_indents_by_depth() {
    let mut tree = Tree::new();
    let div = tree.alloc_tag(TagData::new("div", [("id", "menu head"), ("class", "menu")]));
    tree.append_child(NodeId::ROOT, div).unwrap();
    let text = tree.alloc_text("in header");
    tree.append_child(div, text).unwrap();

    let expected = "<root> : \n\t<div> : class = \"menu\" | id = \"head menu\"\n\t\t<data> : in header";
    assert_eq!(render(&tree), expected);
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_render_skips_detached_nodes() {
    let mut tree = Tree::new();
    let nav = alloc_tag(&mut tree, "nav");
    tree.append_child(NodeId::ROOT, nav).unwrap();
    let _ = tree.retain_children(NodeId::ROOT, |_| false);
    assert_eq!(render(&tree), "<root> : ");
}
