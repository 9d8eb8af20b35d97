//! Nested frames and selection discovery.
//!
//! A [`Frame`] owns one document, the selection made in it, and any child
//! frames embedded in that document. Scripts run with the origin of the top
//! frame; a child frame from another origin refuses access to its selection
//! and to everything nested inside it.

mod aggregate;

pub use aggregate::{FormatReport, FrameReport, RangeFailure, apply_style};

use thiserror::Error;
use tracing::warn;

use crate::document::DocumentTree;
use crate::selection::Selection;

/// Selection access refused by a frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameAccessError {
    #[error("frame `{frame}` ({origin}) is not accessible from {viewer}")]
    CrossOrigin {
        frame: String,
        origin: String,
        viewer: String,
    },
}

/// One browsing context in a frame hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    name: String,
    origin: String,
    document: DocumentTree,
    selection: Selection,
    frames: Vec<Frame>,
}

impl Frame {
    pub fn new(name: impl Into<String>, origin: impl Into<String>, document: DocumentTree) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            document,
            selection: Selection::new(),
            frames: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.frames.push(child);
        self
    }

    pub fn push_child(&mut self, child: Self) {
        self.frames.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub const fn document(&self) -> &DocumentTree {
        &self.document
    }

    pub fn children(&self) -> &[Self] {
        &self.frames
    }

    /// The selection as seen from a script running in `viewer_origin`.
    ///
    /// # Errors
    /// Returns [`FrameAccessError::CrossOrigin`] when the origins differ.
    pub fn selection(&self, viewer_origin: &str) -> Result<&Selection, FrameAccessError> {
        self.check_access(viewer_origin)?;
        Ok(&self.selection)
    }

    fn check_access(&self, viewer_origin: &str) -> Result<(), FrameAccessError> {
        if self.origin == viewer_origin {
            Ok(())
        } else {
            Err(FrameAccessError::CrossOrigin {
                frame: self.name.clone(),
                origin: self.origin.clone(),
                viewer: viewer_origin.to_string(),
            })
        }
    }
}

/// A readable, non-empty selection together with the document it points into.
#[derive(Debug)]
pub struct FrameSelection<'a> {
    pub frame: &'a str,
    pub document: &'a mut DocumentTree,
    pub selection: &'a mut Selection,
}

/// Visit frames in document order, collecting readable selections.
///
/// Returns the selections and the access errors of skipped subtrees.
fn walk_frames<'a>(
    root: &'a mut Frame,
    viewer_origin: &str,
) -> (Vec<FrameSelection<'a>>, Vec<FrameAccessError>) {
    let mut found = Vec::new();
    let mut denied = Vec::new();
    let mut stack = vec![root];
    while let Some(frame) = stack.pop() {
        if let Err(err) = frame.check_access(viewer_origin) {
            warn!(error = %err, "skipping inaccessible frame");
            denied.push(err);
            continue;
        }
        let Frame {
            name,
            document,
            selection,
            frames,
            ..
        } = frame;
        if !selection.is_empty() {
            found.push(FrameSelection {
                frame: name,
                document,
                selection,
            });
        }
        stack.extend(frames.iter_mut().rev());
    }
    (found, denied)
}

/// All non-empty selections reachable from `root`, in document order.
///
/// Frames that refuse access contribute nothing, and neither do the frames
/// nested inside them. The walk itself never fails.
pub fn collect_selections<'a>(root: &'a mut Frame, viewer_origin: &str) -> Vec<FrameSelection<'a>> {
    walk_frames(root, viewer_origin).0
}
