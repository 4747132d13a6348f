//! The three phases of the shortest-palindrome machine
//!
//! 1. [`copy_reverse`]: mirror the input into the copy region, marking input
//!    cells uppercase while they are consumed and restoring them afterwards
//! 2. [`find_overlap`]: longest input suffix equal to a copy prefix
//! 3. [`append_remainder`]: write the unmatched copy tail after the input
//!
//! Phases communicate only through the tape, the copy-region bounds held by
//! [`MachineState`] and the overlap length returned by `find_overlap`.

mod append;
mod copy_reverse;
mod overlap;

pub use append::append_remainder;
pub use copy_reverse::copy_reverse;
pub use overlap::find_overlap;

use crate::machine::{MachineState, Move};
use crate::trace::{StateLabel, StepTracer};
use crate::MachineError;

/// Labels traced for each single-cell move of one relocation
#[derive(Debug, Clone, Copy)]
pub(crate) struct Motion {
    left: StateLabel,
    right: StateLabel,
}

impl Motion {
    pub(crate) const SEEK: Motion = Motion::new(StateLabel::MoveLeft, StateLabel::MoveRight);
    pub(crate) const TO_APPEND: Motion =
        Motion::new(StateLabel::MoveLeftToAppend, StateLabel::MoveRightToAppend);
    pub(crate) const RETURN: Motion =
        Motion::new(StateLabel::MoveLeftToReturn, StateLabel::MoveRightToReturn);
    pub(crate) const UNMARK: Motion =
        Motion::new(StateLabel::MoveLeftToUnmark, StateLabel::MoveRightToUnmark);
    pub(crate) const TO_ORIG: Motion =
        Motion::new(StateLabel::MoveLeftCmp, StateLabel::MoveRightCmp);
    pub(crate) const TO_COPY: Motion =
        Motion::new(StateLabel::MoveLeftCmp2, StateLabel::MoveRightCmp2);
    pub(crate) const TO_FROM: Motion =
        Motion::new(StateLabel::MoveLeftToFrom, StateLabel::MoveRightToFrom);
    pub(crate) const TO_WRITE: Motion =
        Motion::new(StateLabel::MoveLeftToWrite, StateLabel::MoveRightToWrite);

    const fn new(left: StateLabel, right: StateLabel) -> Self {
        Self { left, right }
    }

    fn label(&self, direction: Move) -> StateLabel {
        match direction {
            Move::Left => self.left,
            _ => self.right,
        }
    }
}

/// Walk the head to `target` one cell at a time, tracing every move
///
/// This is the only way phases reposition the head.
pub(crate) fn move_head_to(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
    target: usize,
    motion: Motion,
) -> Result<(), MachineError> {
    loop {
        let direction = Move::toward(state.head(), target);
        if direction == Move::Stay {
            return Ok(());
        }
        state.tape.step(direction)?;
        tracer.trace(motion.label(direction), state)?;
    }
}
