//! Machine state (instantaneous description) of a palindrome run
//!
//! Represents everything the phases share:
//! - The tape and its head
//! - The input region `[input_start, input_stop)`
//! - The copy region `[copy_start, copy_end]`
//! - How many cells have been appended after the input

use std::ops::Range;

use super::{is_unmarked, Symbol, Tape};
use crate::{MachineConfig, MachineError};

/// Complete state threaded through the three phases
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    /// Tape contents and head
    pub(crate) tape: Tape,

    /// First input cell
    input_start: usize,

    /// Number of input symbols
    input_len: usize,

    /// First cell of the reversed copy
    copy_start: usize,

    /// Rightmost cell of the copy region ever written
    ///
    /// Starts on the last input cell and equals `copy_start - 1` once the
    /// copy phase has begun with nothing copied yet.
    pub(crate) copy_end: usize,

    /// Cells written from `input_stop` onwards
    pub(crate) appended: usize,

    /// Cells on each side of the regions shown in a frame
    window_margin: usize,
}

impl MachineState {
    /// Create the initial state for `input`
    ///
    /// The input is placed at `config.tape_start` and the head parked on its
    /// first cell. Nothing is written unless input, gap and copy all fit.
    pub fn load(config: &MachineConfig, input: &[Symbol]) -> Result<Self, MachineError> {
        let n = input.len();
        let input_start = config.tape_start;
        let copy_start = input_start + n + config.copy_gap;

        let mut tape = Tape::blank(config.tape_size);
        let copy_last = copy_start + n.saturating_sub(1);
        if copy_last >= tape.capacity() {
            return Err(MachineError::Bounds {
                position: copy_last,
                direction: super::Move::Stay,
            });
        }
        tape.load(input_start, input)?;
        while tape.head() < input_start {
            tape.move_right()?;
        }

        Ok(Self {
            tape,
            input_start,
            input_len: n,
            copy_start,
            copy_end: (input_start + n).saturating_sub(1),
            appended: 0,
            window_margin: config.window_margin,
        })
    }

    /// Tape (read-only)
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Current head position
    pub fn head(&self) -> usize {
        self.tape.head()
    }

    /// First input cell
    pub fn input_start(&self) -> usize {
        self.input_start
    }

    /// First cell after the input
    pub fn input_stop(&self) -> usize {
        self.input_start + self.input_len
    }

    /// Input cells, empty for an empty input
    pub fn input_cells(&self) -> Range<usize> {
        self.input_start..self.input_stop()
    }

    /// Input length n
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// First copy cell
    pub fn copy_start(&self) -> usize {
        self.copy_start
    }

    /// Rightmost copy-side cell written so far
    pub fn copy_end(&self) -> usize {
        self.copy_end
    }

    /// Number of cells appended after the input
    pub fn appended(&self) -> usize {
        self.appended
    }

    /// Contents of the input region
    pub fn input_text(&self) -> Result<String, MachineError> {
        self.cells_text(self.input_start, self.input_len)
    }

    /// Contents of the copy region
    pub fn copy_text(&self) -> Result<String, MachineError> {
        self.tape.span(self.copy_start, self.copy_end)
    }

    /// Input region followed by the appended cells
    pub fn output_text(&self) -> Result<String, MachineError> {
        self.cells_text(self.input_start, self.input_len + self.appended)
    }

    /// Raw tape from the input start through the final copy end
    pub fn tape_span(&self) -> Result<String, MachineError> {
        self.tape.span(self.input_start, self.copy_end)
    }

    /// Frame bounds `[input_start - margin, copy_end + margin]` before clipping
    pub fn frame_bounds(&self) -> (usize, usize) {
        (
            self.input_start.saturating_sub(self.window_margin),
            self.copy_end.saturating_add(self.window_margin),
        )
    }

    /// Rightmost input cell still holding an unmarked symbol
    pub fn rightmost_unmarked(&self) -> Result<Option<usize>, MachineError> {
        for position in self.input_cells().rev() {
            if is_unmarked(self.tape.peek(position)?) {
                return Ok(Some(position));
            }
        }
        Ok(None)
    }

    /// Whether the input region reads the same in both directions
    pub fn input_is_palindrome(&self) -> Result<bool, MachineError> {
        let n = self.input_len();
        for i in 0..n / 2 {
            let mirror = self.input_stop() - 1 - i;
            if self.tape.peek(self.input_start + i)? != self.tape.peek(mirror)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Contents of `len` cells starting at `start`
    fn cells_text(&self, start: usize, len: usize) -> Result<String, MachineError> {
        match len {
            0 => Ok(String::new()),
            _ => self.tape.span(start, start + len - 1),
        }
    }
}
