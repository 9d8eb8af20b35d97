//! Nearest non-empty text leaf search.
//!
//! Both directions first look inside the given node (from a child index, or
//! for a text leaf, from a char offset), then climb ancestors until one has a
//! sibling in the search direction and continue from there. Empty leaves are
//! never returned. All walks are iterative.

use crate::document::{DocumentTree, NodeId, NodeKind};

fn is_non_empty_text(tree: &DocumentTree, id: NodeId) -> bool {
    tree.text(id).is_some_and(|text| !text.is_empty())
}

/// First non-empty leaf inside `root`'s subtree.
fn first_leaf_in(tree: &DocumentTree, root: NodeId) -> Option<NodeId> {
    root.descendants(tree.arena())
        .find(|&id| is_non_empty_text(tree, id))
}

/// Last non-empty leaf inside `root`'s subtree.
fn last_leaf_in(tree: &DocumentTree, root: NodeId) -> Option<NodeId> {
    // Children are pushed in order so the last child pops first.
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if is_non_empty_text(tree, id) {
            return Some(id);
        }
        stack.extend(tree.children(id));
    }
    None
}

/// Nearest leaf at or after `start_index` within `node`, else after `node`.
///
/// For a text leaf `start_index` is a char offset: the leaf itself is the
/// answer while text remains after it.
pub fn next_leaf(tree: &DocumentTree, node: NodeId, start_index: usize) -> Option<NodeId> {
    match tree.kind(node)? {
        NodeKind::Text => {
            if start_index < tree.text_len(node)? {
                return Some(node);
            }
        }
        kind if kind.is_container() => {
            let inside = tree
                .children(node)
                .skip(start_index)
                .find_map(|child| first_leaf_in(tree, child));
            if inside.is_some() {
                return inside;
            }
        }
        _ => {}
    }
    next_leaf_after(tree, node)
}

/// Nearest leaf before `end_index` within `node`, else before `node`.
///
/// For a text leaf `end_index` is a char offset: the leaf itself is the
/// answer when it is non-empty and `end_index > 0`.
pub fn previous_leaf(tree: &DocumentTree, node: NodeId, end_index: usize) -> Option<NodeId> {
    match tree.kind(node)? {
        NodeKind::Text => {
            if end_index > 0 && is_non_empty_text(tree, node) {
                return Some(node);
            }
        }
        kind if kind.is_container() => {
            let skip = tree.child_count(node).saturating_sub(end_index);
            let inside = tree
                .reverse_children(node)
                .skip(skip)
                .find_map(|child| last_leaf_in(tree, child));
            if inside.is_some() {
                return inside;
            }
        }
        _ => {}
    }
    previous_leaf_before(tree, node)
}

/// First leaf that follows `node`'s whole subtree in document order.
pub fn next_leaf_after(tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
    let mut current = node;
    loop {
        if let Some(sibling) = tree.next_sibling(current) {
            if let Some(leaf) = first_leaf_in(tree, sibling) {
                return Some(leaf);
            }
            current = sibling;
        } else {
            current = tree.parent(current)?;
        }
    }
}

/// Last leaf that precedes `node` in document order (ancestors excluded).
pub fn previous_leaf_before(tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
    let mut current = node;
    loop {
        if let Some(sibling) = tree.previous_sibling(current) {
            if let Some(leaf) = last_leaf_in(tree, sibling) {
                return Some(leaf);
            }
            current = sibling;
        } else {
            current = tree.parent(current)?;
        }
    }
}
