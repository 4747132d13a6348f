//! Step-by-step trace of the machine
//!
//! Every primitive tape action and every logical milestone becomes one
//! [`TraceRecord`]:
//! - Step counter (strictly increasing)
//! - Phase and state label (observability only)
//! - Clipped tape window and head offset within it
//!
//! Records go to a [`TraceSink`]; after each step a [`PauseController`]
//! decides whether the run keeps single-stepping.

mod pause;
mod sinks;
mod tracer;

pub use pause::{AutoRun, PauseController, PauseDecision, PauseMode, ScriptedPause};
#[cfg(feature = "visualize")]
pub use sinks::JsonLinesSink;
pub use sinks::{DigestSink, MemorySink, NullSink, StatusLineSink, TextFrameSink};
pub use tracer::StepTracer;

use crate::machine::Symbol;
use std::fmt;
use std::io;

/// Logical phase of a run
///
/// Phases advance strictly in declaration order; none may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "kebab-case"))]
pub enum Phase {
    /// Input loaded, nothing run yet
    Start,
    /// Building the reversed copy
    CopyingReverse,
    /// Restoring marked input cells to lowercase
    RestoringMarks,
    /// Searching for the longest overlap
    SearchingOverlap,
    /// Appending the unmatched copy tail
    AppendingRemainder,
    /// Terminal state
    Halted,
}

impl Phase {
    /// Successor in the phase order (`None` once halted)
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Start => Some(Phase::CopyingReverse),
            Phase::CopyingReverse => Some(Phase::RestoringMarks),
            Phase::RestoringMarks => Some(Phase::SearchingOverlap),
            Phase::SearchingOverlap => Some(Phase::AppendingRemainder),
            Phase::AppendingRemainder => Some(Phase::Halted),
            Phase::Halted => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::CopyingReverse => "copying-reverse",
            Phase::RestoringMarks => "restoring-marks",
            Phase::SearchingOverlap => "searching-overlap",
            Phase::AppendingRemainder => "appending-remainder",
            Phase::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// Name of the current logical step
///
/// Labels are trace metadata; no component branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StateLabel {
    Start,

    // copy-reverse
    CopyReverseStart,
    SeekRightmostUnmarked,
    CopyReverseDone,
    MoveLeft,
    MoveRight,
    ReadUnmarked,
    MarkOriginal,
    MoveLeftToAppend,
    MoveRightToAppend,
    WriteCopy,
    MoveLeftToReturn,
    MoveRightToReturn,
    ReturnSearch,

    // restore
    UnmarkOriginals,
    MoveLeftToUnmark,
    MoveRightToUnmark,
    UnmarkCell,
    AfterUnmark,

    // overlap search
    FindOverlapStart,
    MoveLeftCmp,
    MoveRightCmp,
    ReadOrig,
    MoveLeftCmp2,
    MoveRightCmp2,
    ReadCopy,
    Mismatch,
    MatchChar,
    OverlapFound(usize),
    TryLower(usize),

    // append
    AppendRemainder(usize),
    MoveLeftToFrom,
    MoveRightToFrom,
    ReadRemainder,
    MoveLeftToWrite,
    MoveRightToWrite,
    WriteRemainder,
    AfterAppend,

    Halt,
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StateLabel as L;
        let name = match self {
            L::OverlapFound(t) => return write!(f, "q_overlap_found_t={t}"),
            L::TryLower(t) => return write!(f, "q_try_lower_t={t}"),
            L::AppendRemainder(k) => return write!(f, "q_append_remainder_k={k}"),
            L::Start => "q_start",
            L::CopyReverseStart => "q_copy_reverse_start",
            L::SeekRightmostUnmarked => "q_seek_rightmost_unmarked",
            L::CopyReverseDone => "q_copy_reverse_done",
            L::MoveLeft => "move_left",
            L::MoveRight => "move_right",
            L::ReadUnmarked => "q_read_unmarked",
            L::MarkOriginal => "q_mark_original",
            L::MoveLeftToAppend => "move_left_to_append",
            L::MoveRightToAppend => "move_right_to_append",
            L::WriteCopy => "q_write_copy",
            L::MoveLeftToReturn => "move_left_to_return",
            L::MoveRightToReturn => "move_right_to_return",
            L::ReturnSearch => "q_return_search",
            L::UnmarkOriginals => "q_unmark_originals",
            L::MoveLeftToUnmark => "move_left_to_unmark",
            L::MoveRightToUnmark => "move_right_to_unmark",
            L::UnmarkCell => "q_unmark_cell",
            L::AfterUnmark => "q_after_unmark",
            L::FindOverlapStart => "q_find_overlap_start",
            L::MoveLeftCmp => "move_left_cmp",
            L::MoveRightCmp => "move_right_cmp",
            L::ReadOrig => "q_read_orig",
            L::MoveLeftCmp2 => "move_left_cmp2",
            L::MoveRightCmp2 => "move_right_cmp2",
            L::ReadCopy => "q_read_copy",
            L::Mismatch => "q_mismatch",
            L::MatchChar => "q_match_char",
            L::MoveLeftToFrom => "move_left_to_from",
            L::MoveRightToFrom => "move_right_to_from",
            L::ReadRemainder => "q_read_remainder",
            L::MoveLeftToWrite => "move_left_to_write",
            L::MoveRightToWrite => "move_right_to_write",
            L::WriteRemainder => "q_write_remainder",
            L::AfterAppend => "q_after_append",
            L::Halt => "q_halt",
        };
        f.write_str(name)
    }
}

/// One traced step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TraceRecord {
    /// Step counter after this action
    pub step: u64,

    /// Phase the action belongs to
    pub phase: Phase,

    /// Rendered state label
    pub state: String,

    /// Structured label
    #[cfg_attr(feature = "visualize", serde(skip))]
    pub label: StateLabel,

    /// Tape index of the first window cell
    pub window_start: usize,

    /// Clipped tape window
    pub window: Vec<Symbol>,

    /// Absolute head position
    pub head: usize,

    /// Head position relative to `window_start`
    pub head_offset: isize,
}

impl TraceRecord {
    /// Window as a string
    pub fn window_text(&self) -> String {
        self.window.iter().collect()
    }

    /// Caret line aligned under the window (`^` at the head)
    pub fn head_marker(&self) -> String {
        (0..self.window.len())
            .map(|i| if i as isize == self.head_offset { '^' } else { ' ' })
            .collect()
    }
}

/// Out-of-band notes attached to the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Annotation {
    /// The run is waiting on the pause controller
    PausePrompt {
        /// Step the run is paused after
        step: u64,
    },
    /// Controller chose to keep single-stepping
    Continued,
    /// Controller switched the run to automatic mode
    SwitchedToAutomatic,
}

/// Receiver of trace records
///
/// Emission is synchronous: the next step is not taken until `record`
/// returns.
pub trait TraceSink {
    /// Consume one record
    fn record(&mut self, record: &TraceRecord) -> io::Result<()>;

    /// Consume an annotation (ignored by default)
    fn annotate(&mut self, _note: Annotation) -> io::Result<()> {
        Ok(())
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        (**self).record(record)
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        (**self).annotate(note)
    }
}

impl<T: TraceSink> TraceSink for Option<T> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        match self {
            Some(sink) => sink.record(record),
            None => Ok(()),
        }
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        match self {
            Some(sink) => sink.annotate(note),
            None => Ok(()),
        }
    }
}

/// Fan out to both sinks, left first
impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.0.record(record)?;
        self.1.record(record)
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        self.0.annotate(note)?;
        self.1.annotate(note)
    }
}
