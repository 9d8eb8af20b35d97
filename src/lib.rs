// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. frame::FrameReport)
    clippy::module_name_repetitions
)]

//! # Inkmark
//!
//! Inline formatting for selected text across a hierarchy of frames.
//!
//! Given one or more frames, each holding a document tree and a user
//! selection, inkmark wraps every selected text leaf in a styled wrapper
//! element:
//! - Range boundaries are normalized to text leaves, splitting partially
//!   selected leaves
//! - Each leaf between the boundaries gets its own wrapper
//! - Frames the viewer origin may not read are skipped, along with their
//!   descendants
//! - A malformed range fails alone; the rest of the selection is still
//!   formatted
//!
//! ## Modules
//!
//! - [`document`]: Arena-backed document tree and markup output
//! - [`selection`]: Boundaries, ranges and selections
//! - [`style`]: Style declarations, presets and wrapper tags
//! - [`format`]: Leaf location, range normalization and wrapping
//! - [`frame`]: Frame hierarchy, access checks and style aggregation
//! - [`scene`]: JSON scene input
//! - [`config`]: Saved flags and option resolution

pub mod config;
pub mod document;
pub mod format;
pub mod frame;
pub mod scene;
pub mod selection;
pub mod style;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{DocumentTree, NodeId, NodeKind};
    pub use crate::format::{FormatOptions, format_range};
    pub use crate::frame::{FormatReport, Frame, apply_style};
    pub use crate::scene::FrameSpec;
    pub use crate::selection::{Boundary, Range, Selection};
    pub use crate::style::{Preset, StyleSpec, WrapperTag};
}
