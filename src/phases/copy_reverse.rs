//! Phase 1: reversed copy of the input
//!
//! The machine has no registers, so "which input symbol comes next" is
//! encoded on the tape itself: the rightmost lowercase input cell is the next
//! one to copy, and copying it turns it uppercase. Copying in discovery order
//! writes the input reversed. A restore pass then lowers every marked cell.

use super::{move_head_to, Motion};
use crate::machine::{is_marked, is_unmarked, MachineState};
use crate::trace::{Phase, StateLabel, StepTracer};
use crate::MachineError;

/// Write the reverse of the input into the copy region
///
/// On return the copy region is `[copy_start, copy_start + n - 1]` and the
/// input region is identical to its state before the call. Returns the
/// number of symbols copied.
pub fn copy_reverse(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
) -> Result<usize, MachineError> {
    tracer.enter_phase(Phase::CopyingReverse)?;
    tracer.trace(StateLabel::CopyReverseStart, state)?;

    let mut append_pos = state.copy_start();
    state.copy_end = append_pos - 1;

    loop {
        let found = state.rightmost_unmarked()?;
        tracer.trace(StateLabel::SeekRightmostUnmarked, state)?;

        let Some(position) = found else {
            tracer.trace(StateLabel::CopyReverseDone, state)?;
            break;
        };

        move_head_to(state, tracer, position, Motion::SEEK)?;
        let symbol = state.tape.read();
        tracer.trace(StateLabel::ReadUnmarked, state)?;
        if !is_unmarked(symbol) {
            return Err(MachineError::InvariantViolation {
                position,
                expected: "unmarked lowercase symbol",
                found: symbol,
            });
        }

        state.tape.write(symbol.to_ascii_uppercase());
        tracer.trace(StateLabel::MarkOriginal, state)?;

        move_head_to(state, tracer, append_pos, Motion::TO_APPEND)?;
        state.tape.write(symbol);
        append_pos += 1;
        state.copy_end = append_pos - 1;
        tracer.trace(StateLabel::WriteCopy, state)?;

        let input_last = state.input_stop() - 1;
        move_head_to(state, tracer, input_last, Motion::RETURN)?;
        tracer.trace(StateLabel::ReturnSearch, state)?;
    }

    restore_marks(state, tracer)?;
    Ok(append_pos - state.copy_start())
}

/// Lower every marked input cell, then park the head on the input start
fn restore_marks(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
) -> Result<(), MachineError> {
    tracer.enter_phase(Phase::RestoringMarks)?;
    tracer.trace(StateLabel::UnmarkOriginals, state)?;

    for position in state.input_cells() {
        let symbol = state.tape.peek(position)?;
        if is_marked(symbol) {
            move_head_to(state, tracer, position, Motion::UNMARK)?;
            state.tape.write(symbol.to_ascii_lowercase());
            tracer.trace(StateLabel::UnmarkCell, state)?;
        }
    }

    let input_start = state.input_start();
    move_head_to(state, tracer, input_start, Motion::UNMARK)?;
    tracer.trace(StateLabel::AfterUnmark, state)?;

    for position in state.input_cells() {
        let symbol = state.tape.peek(position)?;
        if !is_unmarked(symbol) {
            return Err(MachineError::InvariantViolation {
                position,
                expected: "lowercase symbol after restore",
                found: symbol,
            });
        }
    }
    Ok(())
}
