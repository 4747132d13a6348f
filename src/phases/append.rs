//! Phase 3: append the unmatched tail of the reversed copy

use super::{move_head_to, Motion};
use crate::machine::MachineState;
use crate::trace::{Phase, StateLabel, StepTracer};
use crate::MachineError;

/// Copy copy-region offsets `[k, n)` to the cells right after the input
///
/// `copy_end` keeps tracking the rightmost cell ever written. Returns the
/// number of appended symbols (`n - k`).
pub fn append_remainder(
    state: &mut MachineState,
    tracer: &mut StepTracer<'_>,
    k: usize,
) -> Result<usize, MachineError> {
    tracer.enter_phase(Phase::AppendingRemainder)?;
    tracer.trace(StateLabel::AppendRemainder(k), state)?;

    let n = state.input_len();
    let mut write_pos = state.input_stop();

    for offset in k..n {
        let from = state.copy_start() + offset;
        move_head_to(state, tracer, from, Motion::TO_FROM)?;
        let symbol = state.tape.read();
        tracer.trace(StateLabel::ReadRemainder, state)?;

        move_head_to(state, tracer, write_pos, Motion::TO_WRITE)?;
        state.tape.write(symbol);
        state.appended += 1;
        state.copy_end = state.copy_end.max(write_pos);
        write_pos += 1;
        tracer.trace(StateLabel::WriteRemainder, state)?;
    }

    tracer.trace(StateLabel::AfterAppend, state)?;
    Ok(state.appended())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::symbols;
    use crate::phases::{copy_reverse, find_overlap};
    use crate::trace::{NullSink, PauseMode, ScriptedPause};
    use crate::MachineConfig;

    fn all_phases(word: &str) -> (MachineState, usize, usize) {
        let mut state = MachineState::load(&MachineConfig::default(), &symbols(word)).unwrap();
        let mut sink = NullSink;
        let mut pause = ScriptedPause::default();
        let mut tracer = StepTracer::new(&mut sink, &mut pause, PauseMode::Automatic);
        copy_reverse(&mut state, &mut tracer).unwrap();
        let k = find_overlap(&mut state, &mut tracer).unwrap();
        let appended = append_remainder(&mut state, &mut tracer, k).unwrap();
        (state, k, appended)
    }

    #[test]
    fn test_appends_unmatched_tail() {
        let (state, k, appended) = all_phases("abc");
        assert_eq!(k, 1);
        assert_eq!(appended, 2);
        assert_eq!(state.output_text().unwrap(), "abcba");
        // The copy region itself is untouched by the append.
        assert_eq!(state.copy_text().unwrap(), "cba");
    }

    #[test]
    fn test_only_last_symbol_overlaps() {
        let (state, k, appended) = all_phases("abcd");
        assert_eq!((k, appended), (1, 3));
        assert_eq!(state.output_text().unwrap(), "abcdcba");
    }

    #[test]
    fn test_tape_span_includes_gap_and_copy() {
        let (state, _, _) = all_phases("ab");
        let span = state.tape_span().unwrap();
        assert!(span.starts_with("aba_"));
        assert!(span.ends_with("ba"));
        assert_eq!(span.len(), state.copy_end() - state.input_start() + 1);
    }

    #[test]
    fn test_full_overlap_appends_nothing() {
        let (state, k, appended) = all_phases("level");
        assert_eq!((k, appended), (5, 0));
        assert_eq!(state.output_text().unwrap(), "level");
    }
}
