use sprig_dom::{NodeId, NodeType, Tree};

use crate::policy::RemovalPolicy;

/// Prune the whole tree in place.
///
/// The root itself is never removed; only its descendants are tested.
/// Returns the number of subtrees that were detached.
pub fn prune(tree: &mut Tree, policy: &RemovalPolicy) -> usize {
    let mut removed = 0;
    prune_children(tree, tree.root(), policy, &mut removed);
    removed
}

/// Prune the subtree at `id`.
///
/// Returns `None` when `id` itself is denied by the policy (it is then
/// detached from its parent) or does not exist. Otherwise returns `Some(id)`
/// with the denied descendants detached. Text nodes are always kept.
pub fn prune_node(tree: &mut Tree, id: NodeId, policy: &RemovalPolicy) -> Option<NodeId> {
    let mut removed = 0;
    let kept = prune_subtree(tree, id, policy, &mut removed);
    if kept.is_none()
        && let Some(parent) = tree.parent(id)
    {
        let _ = tree.retain_children(parent, |child| child != id);
    }
    kept
}

/// Test `id` against the policy and recurse into it if it survives.
/// A denied node is reported but not detached; its parent does that.
fn prune_subtree(
    tree: &mut Tree,
    id: NodeId,
    policy: &RemovalPolicy,
    removed: &mut usize,
) -> Option<NodeId> {
    let NodeType::Tag(data) = &tree.get(id)?.node_type else {
        return Some(id);
    };
    if id != tree.root() && policy.denies(data) {
        return None;
    }
    prune_children(tree, id, policy, removed);
    Some(id)
}

fn prune_children(tree: &mut Tree, id: NodeId, policy: &RemovalPolicy, removed: &mut usize) {
    let children = tree.children(id).to_vec();
    let mut dropped = Vec::new();
    for child in children {
        if prune_subtree(tree, child, policy, removed).is_none() {
            dropped.push(child);
        }
    }
    if !dropped.is_empty() {
        *removed += tree.retain_children(id, |child| !dropped.contains(&child));
    }
}
