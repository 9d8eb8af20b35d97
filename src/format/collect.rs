//! Text leaf enumeration.

use crate::document::{DocumentTree, NodeId, NodeKind};

/// Every text leaf under `root` (including `root` itself), in document order.
///
/// Container kinds are descended into; `Other` nodes contribute nothing.
/// Empty leaves are included. Uses the arena's iterative pre-order walk, so
/// depth is not limited by the call stack.
pub fn collect_leaves(tree: &DocumentTree, root: NodeId) -> Vec<NodeId> {
    if !tree.contains(root) {
        return Vec::new();
    }
    root.descendants(tree.arena())
        .filter(|&id| tree.kind(id) == Some(NodeKind::Text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_document_order_across_nesting() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        tree.append(tree.root(), div).unwrap();
        let a = tree.create_text("a");
        tree.append(div, a).unwrap();
        let em = tree.create_element("em");
        tree.append(div, em).unwrap();
        let b = tree.create_text("b");
        tree.append(em, b).unwrap();
        let comment = tree.create_other("skip");
        tree.append(div, comment).unwrap();
        let empty = tree.create_text("");
        tree.append(div, empty).unwrap();
        let c = tree.create_text("c");
        tree.append(div, c).unwrap();

        assert_eq!(collect_leaves(&tree, tree.root()), vec![a, b, empty, c]);
        assert_eq!(collect_leaves(&tree, em), vec![b]);
    }

    #[test]
    fn test_text_root_collects_itself() {
        let mut tree = DocumentTree::new();
        let t = tree.create_text("solo");
        tree.append(tree.root(), t).unwrap();
        assert_eq!(collect_leaves(&tree, t), vec![t]);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut tree = DocumentTree::new();
        let mut parent = tree.root();
        for _ in 0..20_000 {
            let span = tree.create_element("span");
            tree.append(parent, span).unwrap();
            parent = span;
        }
        let leaf = tree.create_text("deep");
        tree.append(parent, leaf).unwrap();
        assert_eq!(collect_leaves(&tree, tree.root()), vec![leaf]);
    }
}
