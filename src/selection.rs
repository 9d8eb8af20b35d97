//! Ranges and selections over a document tree.

use crate::document::{DocumentTree, NodeId, TextSplit};

/// One side of a range: a node and an offset into it.
///
/// For text leaves the offset counts chars; for every other node it counts
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Keep addressing the same position after a text leaf was split.
    pub fn rebase(&mut self, split: &TextSplit) {
        if self.node == split.node && self.offset > split.offset {
            self.node = split.right;
            self.offset -= split.offset;
        } else if self.node == split.parent && self.offset > split.index {
            self.offset += 1;
        }
    }
}

/// A selected span between two boundaries.
///
/// Ranges do not own the nodes they point at; they are cursors into a
/// [`DocumentTree`] and can go stale if that tree changes underneath them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: Boundary,
    end: Boundary,
}

impl Range {
    pub const fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    pub const fn collapsed(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    /// Range covering `start..end` chars of a single text leaf.
    pub const fn within(leaf: NodeId, start: usize, end: usize) -> Self {
        Self::new(Boundary::new(leaf, start), Boundary::new(leaf, end))
    }

    pub const fn start(&self) -> Boundary {
        self.start
    }

    pub const fn end(&self) -> Boundary {
        self.end
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn rebase(&mut self, split: &TextSplit) {
        self.start.rebase(split);
        self.end.rebase(split);
    }

    /// Nearest node containing both boundary nodes.
    pub fn common_ancestor(&self, tree: &DocumentTree) -> Option<NodeId> {
        tree.common_ancestor(self.start.node, self.end.node)
    }
}

/// The ranges a user has selected within one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges(ranges: impl IntoIterator<Item = Range>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn range_at(&self, index: usize) -> Option<Range> {
        self.ranges.get(index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }

    pub fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }

    /// Rebase the ranges from index `first` on after `split`.
    pub fn rebase_from(&mut self, first: usize, split: &TextSplit) {
        for range in self.ranges.iter_mut().skip(first) {
            range.rebase(split);
        }
    }
}
