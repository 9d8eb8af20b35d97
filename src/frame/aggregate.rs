//! Applying a style to every selection in a frame hierarchy.

use serde::Serialize;
use tracing::{debug, warn};

use crate::document::NodeId;
use crate::format::{FormatOptions, format_range};
use crate::style::{StyleSpec, WrapperTag};

use super::{Frame, FrameSelection, walk_frames};

/// A range that could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeFailure {
    /// Position of the range in its selection
    pub range: usize,
    pub reason: String,
}

/// Outcome for one frame's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub frame: String,
    pub ranges: usize,
    /// Wrappers created in this frame's document, in document order per range
    #[serde(skip)]
    pub wrappers: Vec<NodeId>,
    pub wrapped: usize,
    pub failures: Vec<RangeFailure>,
}

/// Outcome of [`apply_style`] over a whole hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    /// Style and wrapper the run applied
    pub style: StyleSpec,
    pub tag: WrapperTag,
    pub frames: Vec<FrameReport>,
    /// Frames skipped because their selection was not readable
    pub denied: Vec<String>,
}

impl FormatReport {
    pub fn wrapped(&self) -> usize {
        self.frames.iter().map(|f| f.wrapped).sum()
    }

    pub fn failures(&self) -> usize {
        self.frames.iter().map(|f| f.failures.len()).sum()
    }
}

/// Format every selected range in `root` and its accessible child frames.
///
/// Ranges are processed in document order. A range that fails is logged
/// and recorded, and processing continues with the next one; whatever it
/// wrapped before failing stays wrapped. Every visited selection is cleared
/// afterwards, whether or not its ranges succeeded.
pub fn apply_style(root: &mut Frame, viewer_origin: &str, options: &FormatOptions) -> FormatReport {
    let (selections, denied) = walk_frames(root, viewer_origin);
    let mut report = FormatReport {
        style: options.style.clone(),
        tag: options.tag,
        frames: Vec::with_capacity(selections.len()),
        denied: denied.iter().map(ToString::to_string).collect(),
    };

    for FrameSelection {
        frame: name,
        document,
        selection,
    } in selections
    {
        let mut frame = FrameReport {
            frame: name.to_string(),
            ranges: selection.range_count(),
            ..FrameReport::default()
        };
        document.drain_splits();
        for index in 0..frame.ranges {
            let Some(range) = selection.range_at(index) else {
                break;
            };
            let outcome = format_range(document, &range, options);
            // Later ranges may point into leaves this one just split.
            for split in document.drain_splits() {
                selection.rebase_from(index + 1, &split);
            }
            match outcome {
                Ok(wrappers) => frame.wrappers.extend(wrappers),
                Err(err) => {
                    warn!(frame = name, range = index, error = %err, "failed to format range");
                    frame.failures.push(RangeFailure {
                        range: index,
                        reason: err.to_string(),
                    });
                }
            }
        }
        selection.remove_all_ranges();
        frame.wrapped = frame.wrappers.len();
        debug!(
            frame = name,
            wrapped = frame.wrapped,
            failed = frame.failures.len(),
            "formatted selection"
        );
        report.frames.push(frame);
    }
    report
}
