//! # Shortest palindrome on a simulated tape machine
//!
//! This library emulates a single-tape machine that extends a word into the
//! shortest palindrome having that word as a prefix. Every head move, read
//! and write is a labeled, traced step.
//!
//! ## Core Algorithm
//!
//! 1. **Copy-reverse**: mirror the input into a disjoint copy region, using
//!    uppercase marks on the input as the only bookkeeping
//! 2. **Overlap search**: brute-force the longest input suffix that equals a
//!    prefix of the copy
//! 3. **Append**: write the unmatched copy tail right after the input
//!
//! Result: input + appended cells is a palindrome, and the shortest one,
//! because the overlap is maximal.
//!
//! ## Usage Example
//!
//! ```
//! use palindrome_machine::{MachineConfig, PalindromeMachine};
//! use palindrome_machine::trace::{AutoRun, MemorySink};
//!
//! let machine = PalindromeMachine::new(MachineConfig::default())?;
//! let mut sink = MemorySink::default();
//! let report = machine.run("abc", &mut sink, &mut AutoRun)?;
//! assert_eq!(report.palindrome, "abcba");
//! assert_eq!(report.overlap, 1);
//! assert_eq!(sink.records().last().map(|r| r.step), Some(report.steps));
//! # Ok::<(), palindrome_machine::MachineError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod machine; // Tape, head moves, machine state
pub mod phases; // Copy-reverse, overlap search, append
pub mod trace; // Step tracer, sinks, pause control
pub mod util; // Untraced string helpers

// Re-exports for convenience
pub use machine::{MachineState, Move, Symbol, Tape};
pub use trace::{PauseController, PauseMode, Phase, StateLabel, StepTracer, TraceRecord, TraceSink};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Main run orchestrator
///
/// Validates input, loads the tape and drives the three phases to `halted`.
#[derive(Debug, Clone)]
pub struct PalindromeMachine {
    config: MachineConfig,
}

/// Configuration parameters for a machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of tape cells
    pub tape_size: usize,

    /// Cell holding the first input symbol
    pub tape_start: usize,

    /// Blank cells between the input and the copy region
    pub copy_gap: usize,

    /// Longest accepted input
    pub max_input: usize,

    /// Cells shown on each side of the regions in a frame
    pub window_margin: usize,

    /// Whether runs start single-stepping or automatic
    pub pause_mode: PauseMode,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            tape_size: Self::DEFAULT_TAPE_SIZE,
            tape_start: Self::DEFAULT_TAPE_START,
            copy_gap: Self::DEFAULT_COPY_GAP,
            max_input: Self::DEFAULT_MAX_INPUT,
            window_margin: Self::DEFAULT_WINDOW_MARGIN,
            pause_mode: PauseMode::Stepping,
        }
    }
}

impl MachineConfig {
    /// Default tape capacity
    pub const DEFAULT_TAPE_SIZE: usize = 8000;
    /// Default first input cell
    pub const DEFAULT_TAPE_START: usize = 1500;
    /// Default input/copy gap
    pub const DEFAULT_COPY_GAP: usize = 80;
    /// Default input length limit
    pub const DEFAULT_MAX_INPUT: usize = 1000;
    /// Default frame margin
    pub const DEFAULT_WINDOW_MARGIN: usize = 12;

    /// Set the input length limit
    pub fn with_max_input(mut self, max_input: usize) -> Self {
        self.max_input = max_input;
        self
    }

    /// Set the frame margin
    pub fn with_window_margin(mut self, margin: usize) -> Self {
        self.window_margin = margin;
        self
    }

    /// Set the initial pause mode
    pub fn with_pause_mode(mut self, mode: PauseMode) -> Self {
        self.pause_mode = mode;
        self
    }

    /// Set the tape capacity and input placement
    pub fn with_tape(mut self, tape_size: usize, tape_start: usize) -> Self {
        self.tape_size = tape_size;
        self.tape_start = tape_start;
        self
    }

    /// Set the input/copy gap
    pub fn with_copy_gap(mut self, copy_gap: usize) -> Self {
        self.copy_gap = copy_gap;
        self
    }

    /// Cells needed for a maximal input, the gap and its copy
    ///
    /// `None` when the count does not fit in `usize`.
    pub fn required_tape(&self) -> Option<usize> {
        self.max_input
            .checked_mul(2)?
            .checked_add(self.tape_start)?
            .checked_add(self.copy_gap)
    }

    /// Check the layout fits the tape
    pub fn validate(&self) -> Result<(), MachineError> {
        if self.copy_gap == 0 {
            return Err(MachineError::InvalidConfig(
                "copy gap must be at least one cell".to_string(),
            ));
        }
        if self.max_input == 0 {
            return Err(MachineError::InvalidConfig(
                "maximum input length must be positive".to_string(),
            ));
        }
        let fits = self
            .required_tape()
            .is_some_and(|required| required <= self.tape_size);
        if !fits {
            return Err(MachineError::InvalidConfig(format!(
                "tape of {} cells cannot hold input start {} + 2 x {} symbols + gap {}",
                self.tape_size, self.tape_start, self.max_input, self.copy_gap
            )));
        }
        Ok(())
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Word the run started from
    pub input: String,

    /// Input region followed by the appended cells
    pub palindrome: String,

    /// Raw tape from the input start through the final copy end
    ///
    /// Includes the blank gap and the reversed copy.
    pub tape_span: String,

    /// Overlap length k found by the search phase
    pub overlap: usize,

    /// Symbols appended after the input
    pub appended: usize,

    /// Total steps (traced actions and milestones)
    pub steps: u64,

    /// Input was already a palindrome; no phase ran
    pub already_palindrome: bool,
}

/// Why an input was not run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing to extend
    #[error("empty input")]
    Empty,

    /// Longer than the configured maximum
    #[error("input length {len} exceeds maximum {max}")]
    TooLong {
        /// Input length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Outside the lowercase alphabet
    #[error("symbol {symbol:?} at index {index} is not a lowercase letter")]
    InvalidSymbol {
        /// Position in the input
        index: usize,
        /// Offending character
        symbol: char,
    },
}

/// Errors that can occur during a run
#[derive(Error, Debug)]
pub enum MachineError {
    /// Head motion or cell access outside the tape
    #[error("Head moved beyond tape bounds at cell {position} (move {direction})")]
    Bounds {
        /// Cell the head was on (or the cell accessed)
        position: usize,
        /// Attempted move
        direction: Move,
    },

    /// A region held a symbol it must never hold at that point
    #[error("Tape invariant violated at cell {position}: expected {expected}, found {found:?}")]
    InvariantViolation {
        /// Offending cell
        position: usize,
        /// What the cell should have held
        expected: &'static str,
        /// What it held
        found: Symbol,
    },

    /// Phase entered out of order
    #[error("Illegal phase transition {from} -> {to}")]
    PhaseOrder {
        /// Current phase
        from: Phase,
        /// Requested phase
        to: Phase,
    },

    /// Input refused before any phase ran
    #[error("Input rejected: {0}")]
    InputRejected(RejectReason),

    /// Configuration does not fit the tape
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),

    /// Trace sink could not take a record
    #[error("Trace sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

impl MachineError {
    /// Whether the run aborted mid-computation (as opposed to never starting)
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MachineError::InputRejected(_) | MachineError::InvalidConfig(_)
        )
    }
}

impl PalindromeMachine {
    /// Create a machine after validating `config`
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Check `input` against the alphabet and length limit
    pub fn check_input(&self, input: &str) -> Result<Vec<Symbol>, RejectReason> {
        if input.is_empty() {
            return Err(RejectReason::Empty);
        }
        let symbols = machine::symbols(input);
        if symbols.len() > self.config.max_input {
            return Err(RejectReason::TooLong {
                len: symbols.len(),
                max: self.config.max_input,
            });
        }
        if let Some((index, &symbol)) = symbols
            .iter()
            .enumerate()
            .find(|&(_, &c)| !machine::is_unmarked(c))
        {
            return Err(RejectReason::InvalidSymbol { index, symbol });
        }
        Ok(symbols)
    }

    /// Run on `input`, tracing every step into `sink`
    ///
    /// Rejected input returns [`MachineError::InputRejected`] before the tape
    /// is created or any record is emitted.
    pub fn run(
        &self,
        input: &str,
        sink: &mut dyn TraceSink,
        pause: &mut dyn PauseController,
    ) -> Result<RunReport, MachineError> {
        let symbols = self.check_input(input).map_err(|reason| {
            warn!(%reason, "input rejected");
            MachineError::InputRejected(reason)
        })?;

        let mut state = MachineState::load(&self.config, &symbols)?;
        let mut tracer = StepTracer::new(sink, pause, self.config.pause_mode);
        tracer.emit_frame(&state)?;

        let n = state.input_len();
        if state.input_is_palindrome()? {
            info!(input, "input is already a palindrome");
            return Ok(RunReport {
                input: input.to_string(),
                palindrome: input.to_string(),
                tape_span: state.tape_span()?,
                overlap: n,
                appended: 0,
                steps: tracer.steps(),
                already_palindrome: true,
            });
        }

        let copied = phases::copy_reverse(&mut state, &mut tracer)?;
        debug!(copied, steps = tracer.steps(), "reversed copy written");

        let overlap = phases::find_overlap(&mut state, &mut tracer)?;
        debug!(overlap, steps = tracer.steps(), "overlap found");

        let appended = phases::append_remainder(&mut state, &mut tracer, overlap)?;
        tracer.halt(&state)?;

        let report = RunReport {
            input: input.to_string(),
            palindrome: state.output_text()?,
            tape_span: state.tape_span()?,
            overlap,
            appended,
            steps: tracer.steps(),
            already_palindrome: false,
        };
        info!(
            input,
            palindrome = %report.palindrome,
            steps = report.steps,
            "machine halted"
        );
        Ok(report)
    }

    /// Run without pausing or keeping the trace
    pub fn run_automatic(&self, input: &str) -> Result<RunReport, MachineError> {
        let mut sink = trace::NullSink;
        let mut pause = trace::AutoRun;
        let machine = PalindromeMachine {
            config: self.config.clone().with_pause_mode(PauseMode::Automatic),
        };
        machine.run(input, &mut sink, &mut pause)
    }
}
