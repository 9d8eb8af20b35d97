//! Document tree model.
//!
//! This module handles:
//! - Arena storage of nodes with parent/sibling navigation
//! - Text leaf splitting that preserves content and position
//! - Serializing trees back to markup for display

mod markup;
mod tree;

pub use indextree::NodeId;
pub use tree::{
    DocumentTree, ElementData, NodeData, NodeKind, TextSplit, TreeError, WrapperData,
};
