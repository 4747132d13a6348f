//! Phase 2: longest input suffix matching a prefix of the reversed copy

use super::{move_head_to, Motion};
use crate::machine::MachineState;
use crate::trace::{Phase, StateLabel, StepTracer};
use crate::MachineError;

/// Largest `t` in `[0, n]` such that the last `t` input symbols equal the
/// first `t` copy symbols
///
/// Candidates are tried from `n` down, each compared cell by cell with the
/// head walking between the two regions; the first full match wins. `t = 0`
/// always matches, so the search ends within `n + 1` candidates.
pub fn find_overlap(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
) -> Result<usize, MachineError> {
    tracer.enter_phase(Phase::SearchingOverlap)?;
    tracer.trace(StateLabel::FindOverlapStart, state)?;

    let n = state.input_len();
    for t in (1..=n).rev() {
        if aligned(state, tracer, t)? {
            tracer.trace(StateLabel::OverlapFound(t), state)?;
            return Ok(t);
        }
        tracer.trace(StateLabel::TryLower(t - 1), state)?;
    }

    tracer.trace(StateLabel::OverlapFound(0), state)?;
    Ok(0)
}

/// Compare the last `t` input cells with the first `t` copy cells
fn aligned(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
    t: usize,
) -> Result<bool, MachineError> {
    let suffix_start = state.input_stop() - t;
    for i in 0..t {
        move_head_to(state, tracer, suffix_start + i, Motion::TO_ORIG)?;
        let original = state.tape.read();
        tracer.trace(StateLabel::ReadOrig, state)?;

        let copy_pos = state.copy_start() + i;
        move_head_to(state, tracer, copy_pos, Motion::TO_COPY)?;
        let copied = state.tape.read();
        tracer.trace(StateLabel::ReadCopy, state)?;

        if original != copied {
            tracer.trace(StateLabel::Mismatch, state)?;
            return Ok(false);
        }
        tracer.trace(StateLabel::MatchChar, state)?;
    }
    Ok(true)
}
