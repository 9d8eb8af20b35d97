//! Range formatting engine.
//!
//! Turns an arbitrary [`Range`] into the ordered list of text leaves it
//! covers and wraps each one in a styled inline container:
//! - [`normalize`] splits or snaps the boundaries onto whole leaves
//! - [`collect_leaves`] enumerates leaves under the common ancestor
//! - [`wrap_leaf`] inserts one wrapper per leaf
//!
//! Splitting and wrapping only ever add nodes; the concatenated text of the
//! document is the same before and after formatting.

mod collect;
mod locate;
mod normalize;
mod wrap;

pub use collect::collect_leaves;
pub use locate::{next_leaf, next_leaf_after, previous_leaf, previous_leaf_before};
pub use normalize::{NormalizedRange, normalize};
pub use wrap::wrap_leaf;

use thiserror::Error;
use tracing::debug;

use crate::document::{DocumentTree, NodeId, NodeKind, TreeError};
use crate::selection::Range;
use crate::style::{StyleSpec, WrapperTag};

/// Why a range could not be formatted.
///
/// Leaves wrapped before the failure stay wrapped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeResolutionError {
    #[error("range boundary {0} is not a live node")]
    RemovedNode(NodeId),
    #[error("offset {offset} is out of bounds for node {node} (length {len})")]
    InvalidOffset {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    #[error("range ends before it starts inside node {0}")]
    Inverted(NodeId),
    #[error("range boundaries {start} and {end} share no ancestor")]
    NoCommonAncestor { start: NodeId, end: NodeId },
    #[error("boundary leaf {leaf} is not under common ancestor {ancestor}")]
    BoundaryNotCollected { leaf: NodeId, ancestor: NodeId },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// What to wrap selected text with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub style: StyleSpec,
    pub tag: WrapperTag,
}

impl FormatOptions {
    pub const fn new(style: StyleSpec, tag: WrapperTag) -> Self {
        Self { style, tag }
    }
}

/// Wrap every text leaf covered by `range`.
///
/// Returns the created wrappers in document order. A collapsed range, or one
/// that encloses no text, returns an empty list without touching the tree.
///
/// # Errors
/// See [`RangeResolutionError`]. Wrapping is not rolled back on failure.
pub fn format_range(
    tree: &mut DocumentTree,
    range: &Range,
    options: &FormatOptions,
) -> Result<Vec<NodeId>, RangeResolutionError> {
    let Some(NormalizedRange { start, end }) = normalize(tree, range)? else {
        return Ok(Vec::new());
    };
    let ancestor = tree
        .common_ancestor(start, end)
        .ok_or(RangeResolutionError::NoCommonAncestor { start, end })?;

    if tree.kind(ancestor) == Some(NodeKind::Text) {
        let wrapper = wrap_leaf(tree, ancestor, &options.style, options.tag)?;
        debug!(leaf = %ancestor, "wrapped single leaf");
        return Ok(vec![wrapper]);
    }

    let leaves = collect_leaves(tree, ancestor);
    let first = leaves
        .iter()
        .position(|&leaf| leaf == start)
        .ok_or(RangeResolutionError::BoundaryNotCollected {
            leaf: start,
            ancestor,
        })?;
    let last = leaves
        .iter()
        .rposition(|&leaf| leaf == end)
        .ok_or(RangeResolutionError::BoundaryNotCollected { leaf: end, ancestor })?;

    if first > last {
        debug!(start = %start, end = %end, "range ends before it starts, nothing to wrap");
        return Ok(Vec::new());
    }
    let covered = leaves.get(first..=last).unwrap_or_default();
    let mut wrappers = Vec::with_capacity(covered.len());
    for &leaf in covered {
        wrappers.push(wrap_leaf(tree, leaf, &options.style, options.tag)?);
    }
    debug!(
        ancestor = %ancestor,
        leaves = wrappers.len(),
        "wrapped range"
    );
    Ok(wrappers)
}
