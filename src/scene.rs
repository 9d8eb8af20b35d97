//! JSON scene input.
//!
//! A scene describes a frame hierarchy with documents and selections, so the
//! formatting engine can be driven without a live browser:
//!
//! ```json
//! {
//!   "name": "top",
//!   "origin": "https://example.com",
//!   "document": [{ "element": "p", "children": ["Hello", "World"] }],
//!   "selection": [{ "start": { "path": [0, 0], "offset": 2 },
//!                   "end":   { "path": [0, 1], "offset": 3 } }],
//!   "frames": []
//! }
//! ```
//!
//! Paths are child indices from the document root; offsets count chars in
//! text nodes and children elsewhere. A frame without an origin inherits its
//! parent's.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::document::{DocumentTree, NodeId, TreeError};
use crate::frame::Frame;
use crate::selection::{Boundary, Range, Selection};

/// Origin given to a top frame that does not declare one.
pub const DEFAULT_ORIGIN: &str = "about:blank";

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame `{frame}`: no node at path {path:?}")]
    BadPath { frame: String, path: Vec<usize> },
    #[error("frame `{frame}`: offset {offset} exceeds length {len} of node at {path:?}")]
    BadOffset {
        frame: String,
        path: Vec<usize>,
        offset: usize,
        len: usize,
    },
    #[error("frame `{frame}`: {source}")]
    Tree {
        frame: String,
        #[source]
        source: TreeError,
    },
}

/// A document node. Bare strings are text nodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Plain(String),
    Text {
        text: String,
    },
    Comment {
        comment: String,
    },
    Element {
        element: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PointSpec {
    #[serde(default)]
    pub path: Vec<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RangeSpec {
    pub start: PointSpec,
    pub end: PointSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FrameSpec {
    pub name: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub document: Vec<NodeSpec>,
    #[serde(default)]
    pub selection: Vec<RangeSpec>,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

impl FrameSpec {
    pub fn from_json_str(s: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Build the frame hierarchy, resolving selection paths to nodes.
    ///
    /// # Errors
    /// Fails when a selection path does not exist or an offset is out of
    /// bounds for the node it points at.
    pub fn build(&self) -> Result<Frame, SceneError> {
        self.build_with_origin(DEFAULT_ORIGIN)
    }

    fn build_with_origin(&self, inherited: &str) -> Result<Frame, SceneError> {
        let origin = self.origin.as_deref().unwrap_or(inherited);
        let document = build_document(&self.document).map_err(|source| SceneError::Tree {
            frame: self.name.clone(),
            source,
        })?;

        let mut selection = Selection::new();
        for range in &self.selection {
            selection.add_range(Range::new(
                self.resolve(&document, &range.start)?,
                self.resolve(&document, &range.end)?,
            ));
        }

        let mut frame = Frame::new(&self.name, origin, document).with_selection(selection);
        for child in &self.frames {
            frame.push_child(child.build_with_origin(origin)?);
        }
        Ok(frame)
    }

    fn resolve(&self, document: &DocumentTree, point: &PointSpec) -> Result<Boundary, SceneError> {
        let node = point
            .path
            .iter()
            .try_fold(document.root(), |node, &index| document.child_at(node, index))
            .ok_or_else(|| SceneError::BadPath {
                frame: self.name.clone(),
                path: point.path.clone(),
            })?;
        let len = document.node_len(node).unwrap_or(0);
        if point.offset > len {
            return Err(SceneError::BadOffset {
                frame: self.name.clone(),
                path: point.path.clone(),
                offset: point.offset,
                len,
            });
        }
        Ok(Boundary::new(node, point.offset))
    }
}

/// Build a document whose root holds `nodes`.
pub fn build_document(nodes: &[NodeSpec]) -> Result<DocumentTree, TreeError> {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let mut pending: Vec<(NodeId, &NodeSpec)> = nodes.iter().rev().map(|n| (root, n)).collect();
    while let Some((parent, spec)) = pending.pop() {
        let id = match spec {
            NodeSpec::Plain(text) | NodeSpec::Text { text } => tree.create_text(text.as_str()),
            NodeSpec::Comment { comment } => tree.create_other(comment.as_str()),
            NodeSpec::Element {
                element,
                attrs,
                children,
            } => {
                let id = tree.create_element(element.as_str());
                for (name, value) in attrs {
                    tree.set_attr(id, name.as_str(), value.as_str())?;
                }
                pending.extend(children.iter().rev().map(|child| (id, child)));
                id
            }
        };
        tree.append(parent, id)?;
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "name": "top",
        "origin": "https://example.com",
        "document": [
            { "element": "p", "attrs": { "class": "intro" }, "children": ["Hello", { "text": "World" }] },
            { "comment": "footer" }
        ],
        "selection": [
            { "start": { "path": [0, 0], "offset": 2 }, "end": { "path": [0, 1], "offset": 3 } }
        ],
        "frames": [
            { "name": "inner", "document": ["x"] },
            { "name": "ad", "origin": "https://ads.example", "frames": [{ "name": "nested" }] }
        ]
    }"#;

    #[test]
    fn test_builds_document_and_selection() {
        let frame = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
        assert_eq!(
            frame.document().to_markup(),
            "<p class=\"intro\">HelloWorld</p><!--footer-->"
        );
        let selection = frame.selection("https://example.com").unwrap();
        assert_eq!(selection.range_count(), 1);
        let range = selection.range_at(0).unwrap();
        assert_eq!(frame.document().text(range.start().node), Some("Hello"));
        assert_eq!(range.start().offset, 2);
        assert_eq!(frame.document().text(range.end().node), Some("World"));
    }

    #[test]
    fn test_origins_are_inherited() {
        let frame = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
        let children = frame.children();
        assert_eq!(children[0].origin(), "https://example.com");
        assert_eq!(children[1].origin(), "https://ads.example");
        assert_eq!(children[1].children()[0].origin(), "https://ads.example");
    }

    #[test]
    fn test_missing_origin_defaults() {
        let frame = FrameSpec::from_json_str(r#"{ "name": "solo" }"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(frame.origin(), DEFAULT_ORIGIN);
    }

    #[test]
    fn test_bad_path_is_reported() {
        let json = r#"{ "name": "f", "document": ["a"],
            "selection": [{ "start": { "path": [3], "offset": 0 }, "end": { "path": [0], "offset": 1 } }] }"#;
        let err = FrameSpec::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, SceneError::BadPath { ref path, .. } if path == &vec![3]));
    }

    #[test]
    fn test_bad_offset_is_reported() {
        let json = r#"{ "name": "f", "document": ["abc"],
            "selection": [{ "start": { "path": [0], "offset": 0 }, "end": { "path": [0], "offset": 7 } }] }"#;
        let err = FrameSpec::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, SceneError::BadOffset { offset: 7, len: 3, .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            FrameSpec::from_json_str("{ nope"),
            Err(SceneError::Json(_))
        ));
    }
}
