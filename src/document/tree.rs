//! Arena-backed document tree.

use std::collections::{BTreeMap, HashSet};

use indextree::{Arena, NodeError, NodeId};
use thiserror::Error;

use crate::style::{StyleSpec, WrapperTag};

/// Errors raised by structural tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} has been removed from the document")]
    Removed(NodeId),
    #[error("node {0} is not a text leaf")]
    NotText(NodeId),
    #[error("node {0} cannot hold children")]
    NotAContainer(NodeId),
    #[error("node {0} is not an element")]
    NotElement(NodeId),
    #[error("node {0} has no parent")]
    Orphan(NodeId),
    #[error("offset {offset} is past the end of node {node} (length {len})")]
    OffsetOutOfRange {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    #[error("invalid tree edit: {0}")]
    Structure(#[from] NodeError),
}

/// Coarse classification of a node, used by traversal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Fragment,
    Element,
    Container,
    Text,
    Other,
}

impl NodeKind {
    /// Kinds whose children take part in text traversal.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Fragment | Self::Element | Self::Container
        )
    }
}

/// Regular element (tag + attributes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
}

/// Inline wrapper inserted around a single text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperData {
    pub tag: WrapperTag,
    pub style: StyleSpec,
}

/// What goes in each arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Invisible root of a document
    Document,
    /// Detached holder of sibling nodes
    Fragment,
    Element(ElementData),
    Container(WrapperData),
    Text(String),
    /// Comments, processing instructions and anything else without text or children
    Other(String),
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Fragment => NodeKind::Fragment,
            Self::Element(_) => NodeKind::Element,
            Self::Container(_) => NodeKind::Container,
            Self::Text(_) => NodeKind::Text,
            Self::Other(_) => NodeKind::Other,
        }
    }
}

/// Record of one [`DocumentTree::split_text`] call, used to keep ranges
/// that point into the split leaf (or its parent) in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplit {
    /// The leaf that was split; it keeps the left half
    pub node: NodeId,
    pub offset: usize,
    /// New leaf holding the right half
    pub right: NodeId,
    pub parent: NodeId,
    /// Position of `node` in `parent` at split time
    pub index: usize,
}

/// An ordered, rooted tree of nodes.
///
/// The arena owns every node; parent and sibling links are lookups into it,
/// so there are no reference cycles to manage. Nodes that are detached from
/// the root stay alive in the arena until the tree is dropped.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    arena: Arena<NodeData>,
    root: NodeId,
    splits: Vec<TextSplit>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Create a tree holding only an empty document root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Document);
        Self {
            arena,
            root,
            splits: Vec::new(),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub const fn arena(&self) -> &Arena<NodeData> {
        &self.arena
    }

    /// Node payload, or `None` if the id does not belong to a live node.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(indextree::Node::get)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(NodeData::kind)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` is connected to this tree's root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && id.ancestors(&self.arena).any(|a| a == self.root)
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Element(ElementData {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        }))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.arena.new_node(NodeData::Fragment)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Text(text.into()))
    }

    pub fn create_other(&mut self, data: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Other(data.into()))
    }

    pub(crate) fn create_wrapper(&mut self, tag: WrapperTag, style: StyleSpec) -> NodeId {
        self.arena
            .new_node(NodeData::Container(WrapperData { tag, style }))
    }

    /// Set an attribute on an element node.
    ///
    /// # Errors
    /// Fails when `id` is not a live element.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TreeError> {
        match self.arena.get_mut(id).map(indextree::Node::get_mut) {
            Some(NodeData::Element(el)) => {
                el.attrs.insert(name.into(), value.into());
                Ok(())
            }
            Some(_) => Err(TreeError::NotElement(id)),
            None => Err(TreeError::Removed(id)),
        }
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Fails when `parent` cannot hold children or the edit would create a cycle.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let kind = self.kind(parent).ok_or(TreeError::Removed(parent))?;
        if !kind.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::Removed(child));
        }
        parent.checked_append(child, &mut self.arena)?;
        Ok(())
    }

    /// Unlink `id` (and its subtree) from its parent and siblings.
    pub fn detach(&mut self, id: NodeId) {
        id.detach(&mut self.arena);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.parent()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.next_sibling()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.previous_sibling()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn reverse_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena).rev()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        id.children(&self.arena).count()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        id.children(&self.arena).nth(index)
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        self.parent(id)?;
        Some(id.preceding_siblings(&self.arena).count() - 1)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.get(id)? {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Length of a text leaf in chars.
    pub fn text_len(&self, id: NodeId) -> Option<usize> {
        self.text(id).map(|text| text.chars().count())
    }

    /// The offset bound of a node: chars for text, children otherwise.
    pub fn node_len(&self, id: NodeId) -> Option<usize> {
        match self.get(id)? {
            NodeData::Text(text) => Some(text.chars().count()),
            NodeData::Other(_) => Some(0),
            _ => Some(self.child_count(id)),
        }
    }

    /// Concatenated text of every leaf under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        id.descendants(&self.arena)
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Nearest node that is an ancestor of (or equal to) both `a` and `b`.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let lineage: HashSet<NodeId> = a.ancestors(&self.arena).collect();
        b.ancestors(&self.arena).find(|n| lineage.contains(n))
    }

    /// Split a text leaf at char offset `offset`.
    ///
    /// The left half keeps the original node id; the right half becomes a new
    /// text node inserted directly after it. Any `offset` in `0..=len` is
    /// valid, so either half may be empty.
    ///
    /// # Errors
    /// Fails when `id` is not a live text leaf, has no parent, or `offset`
    /// exceeds its length.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<(NodeId, NodeId), TreeError> {
        let len = self.text_len(id).ok_or_else(|| {
            if self.contains(id) {
                TreeError::NotText(id)
            } else {
                TreeError::Removed(id)
            }
        })?;
        if offset > len {
            return Err(TreeError::OffsetOutOfRange {
                node: id,
                offset,
                len,
            });
        }
        let (Some(parent), Some(index)) = (self.parent(id), self.index_in_parent(id)) else {
            return Err(TreeError::Orphan(id));
        };

        let tail = match self.arena[id].get_mut() {
            NodeData::Text(text) => {
                let at = text
                    .char_indices()
                    .nth(offset)
                    .map_or(text.len(), |(byte, _)| byte);
                text.split_off(at)
            }
            _ => return Err(TreeError::NotText(id)),
        };
        let right = self.arena.new_node(NodeData::Text(tail));
        id.checked_insert_after(right, &mut self.arena)?;
        self.splits.push(TextSplit {
            node: id,
            offset,
            right,
            parent,
            index,
        });
        Ok((id, right))
    }

    /// Splits performed since the last call, oldest first.
    pub fn drain_splits(&mut self) -> Vec<TextSplit> {
        std::mem::take(&mut self.splits)
    }

    /// Put `replacement` where `target` is, then make `target` its last child.
    pub(crate) fn enclose(&mut self, target: NodeId, replacement: NodeId) -> Result<(), TreeError> {
        if self.parent(target).is_none() {
            return Err(TreeError::Orphan(target));
        }
        target.checked_insert_before(replacement, &mut self.arena)?;
        target.detach(&mut self.arena);
        replacement.checked_append(target, &mut self.arena)?;
        Ok(())
    }
}
