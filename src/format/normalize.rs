//! Snapping range boundaries to whole text leaves.

use crate::document::{DocumentTree, NodeId, NodeKind};
use crate::selection::{Boundary, Range};

use super::RangeResolutionError;
use super::locate::{next_leaf, next_leaf_after, previous_leaf, previous_leaf_before};

/// A range whose ends are whole text leaves: it starts at offset 0 of
/// `start` and ends at the full length of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRange {
    pub start: NodeId,
    pub end: NodeId,
}

fn check_boundary(tree: &DocumentTree, b: Boundary) -> Result<NodeKind, RangeResolutionError> {
    let kind = tree
        .kind(b.node)
        .ok_or(RangeResolutionError::RemovedNode(b.node))?;
    let len = tree.node_len(b.node).unwrap_or(0);
    if b.offset > len && kind != NodeKind::Other {
        return Err(RangeResolutionError::InvalidOffset {
            node: b.node,
            offset: b.offset,
            len,
        });
    }
    Ok(kind)
}

/// Align `range` to text leaf edges, splitting leaves where a boundary falls
/// inside one.
///
/// Returns `Ok(None)` when the range is collapsed or one of its sides has no
/// text to snap to; in that case the tree is left untouched. Splitting never
/// changes the concatenated text of the document.
///
/// # Errors
/// Fails when a boundary refers to a removed node, an offset is out of
/// bounds, the range is inverted inside one node, or a split is impossible
/// (the leaf has no parent).
pub fn normalize(
    tree: &mut DocumentTree,
    range: &Range,
) -> Result<Option<NormalizedRange>, RangeResolutionError> {
    if range.is_collapsed() {
        return Ok(None);
    }
    let start = range.start();
    let mut end = range.end();
    let start_kind = check_boundary(tree, start)?;
    let end_kind = check_boundary(tree, end)?;
    if start.node == end.node && end.offset < start.offset {
        return Err(RangeResolutionError::Inverted(start.node));
    }

    let start_leaf = match start_kind {
        NodeKind::Text => {
            let len = tree.text_len(start.node).unwrap_or(0);
            if start.offset >= len {
                next_leaf_after(tree, start.node)
            } else if start.offset == 0 {
                Some(start.node)
            } else {
                let index = tree.index_in_parent(start.node);
                let parent = tree.parent(start.node);
                let (_, right) = tree.split_text(start.node, start.offset)?;
                // Keep the end boundary pointing at the same text position.
                if end.node == start.node {
                    end = Boundary::new(right, end.offset - start.offset);
                } else if parent == Some(end.node) && index.is_some_and(|i| end.offset > i) {
                    end.offset += 1;
                }
                Some(right)
            }
        }
        NodeKind::Other => next_leaf_after(tree, start.node),
        _ => next_leaf(tree, start.node, start.offset),
    };

    let end_leaf = match end_kind {
        NodeKind::Text => {
            let len = tree.text_len(end.node).unwrap_or(0);
            if end.offset == 0 {
                previous_leaf_before(tree, end.node)
            } else if end.offset >= len {
                Some(end.node)
            } else {
                tree.split_text(end.node, end.offset)?;
                Some(end.node)
            }
        }
        NodeKind::Other => previous_leaf_before(tree, end.node),
        _ => previous_leaf(tree, end.node, end.offset),
    };

    Ok(start_leaf
        .zip(end_leaf)
        .map(|(start, end)| NormalizedRange { start, end }))
}
