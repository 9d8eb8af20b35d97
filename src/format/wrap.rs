//! Inline wrapper insertion.

use crate::document::{DocumentTree, NodeId, NodeKind, TreeError};
use crate::style::{StyleSpec, WrapperTag};

/// Wrap a single text leaf in a new styled container.
///
/// The container takes the leaf's place among its siblings and the leaf
/// becomes its only child. Returns the new container.
///
/// # Errors
/// Fails when `leaf` is not a live text node or has no parent to insert the
/// container into.
pub fn wrap_leaf(
    tree: &mut DocumentTree,
    leaf: NodeId,
    style: &StyleSpec,
    tag: WrapperTag,
) -> Result<NodeId, TreeError> {
    match tree.kind(leaf) {
        Some(NodeKind::Text) => {}
        Some(_) => return Err(TreeError::NotText(leaf)),
        None => return Err(TreeError::Removed(leaf)),
    }
    if tree.parent(leaf).is_none() {
        return Err(TreeError::Orphan(leaf));
    }
    let wrapper = tree.create_wrapper(tag, style.clone());
    tree.enclose(leaf, wrapper)?;
    Ok(wrapper)
}
