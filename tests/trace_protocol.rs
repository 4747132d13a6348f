//! Trace protocol: step numbering, phases, frames and pausing

use palindrome_machine::trace::{
    Annotation, MemorySink, PauseDecision, ScriptedPause, TextFrameSink,
};
use palindrome_machine::*;
mod test_helpers;
use test_helpers::*;

#[test]
fn steps_are_consecutive_from_zero() {
    let (report, records) = run_traced("abcb").unwrap();
    assert_eq!(records.first().map(|r| r.step), Some(0));
    for (expected, record) in records.iter().enumerate() {
        assert_eq!(record.step, expected as u64);
    }
    assert_eq!(records.last().map(|r| r.step), Some(report.steps));
    assert_eq!(records.last().map(|r| r.label), Some(StateLabel::Halt));
}

#[test]
fn phases_never_go_back() {
    let (_, records) = run_traced("xyz").unwrap();
    let mut phases: Vec<Phase> = records.iter().map(|r| r.phase).collect();
    assert!(phases.windows(2).all(|w| w[0] <= w[1]));

    phases.dedup();
    assert_eq!(
        phases,
        vec![
            Phase::Start,
            Phase::CopyingReverse,
            Phase::RestoringMarks,
            Phase::SearchingOverlap,
            Phase::AppendingRemainder,
            Phase::Halted,
        ]
    );
}

#[test]
fn head_moves_one_cell_per_step() {
    let (_, records) = run_traced("abcd").unwrap();
    for pair in records.windows(2) {
        let distance = pair[0].head.abs_diff(pair[1].head);
        assert!(distance <= 1, "head jumped between steps {} and {}", pair[0].step, pair[1].step);
    }
}

#[test]
fn frames_span_input_through_copy_end() {
    let config = MachineConfig::default();
    let (_, records) = run_traced("abc").unwrap();
    let input_start = config.tape_start;
    for record in &records {
        assert_eq!(record.window_start, input_start - config.window_margin);
        assert_eq!(
            record.head_offset,
            record.head as isize - record.window_start as isize
        );
        assert!(record.head_offset >= 0);
        assert!((record.head_offset as usize) < record.window.len());
    }
    // The window grows as the copy region is written.
    let first = records.first().unwrap().window.len();
    let last = records.last().unwrap().window.len();
    assert_eq!(first, 12 + 3 + 12);
    assert_eq!(last, 12 + (3 + 80 + 3) + 12);
}

#[test]
fn overlap_search_reads_in_pairs() {
    let (_, records) = run_traced("abcab").unwrap();
    let reads_orig = records.iter().filter(|r| r.label == StateLabel::ReadOrig).count();
    let reads_copy = records.iter().filter(|r| r.label == StateLabel::ReadCopy).count();
    let verdicts = records
        .iter()
        .filter(|r| matches!(r.label, StateLabel::Mismatch | StateLabel::MatchChar))
        .count();
    assert_eq!(reads_orig, reads_copy);
    assert_eq!(reads_orig, verdicts);
}

#[test]
fn stepping_run_asks_after_every_traced_action() {
    let mut sink = MemorySink::default();
    let mut pause = ScriptedPause::default();
    let report = stepping_machine().run("abc", &mut sink, &mut pause).unwrap();

    // Neither the initial frame nor the halt frame pauses.
    assert_eq!(pause.queries().len() as u64, report.steps - 1);
    assert_eq!(sink.records().len() as u64, report.steps + 1);
    assert_eq!(pause.queries().first().map(|q| q.0), Some(1));
    assert!(pause.queries().iter().all(|&(_, label)| label != StateLabel::Halt));
}

#[test]
fn switch_to_automatic_is_final() {
    let mut sink = MemorySink::default();
    let mut pause = ScriptedPause::new([
        PauseDecision::Continue,
        PauseDecision::Continue,
        PauseDecision::SwitchToAutomatic,
        PauseDecision::Continue,
    ]);
    let report = stepping_machine().run("abc", &mut sink, &mut pause).unwrap();

    assert_eq!(pause.queries().len(), 3);
    assert_eq!(report.palindrome, "abcba");
    assert_eq!(
        sink.annotations(),
        &[
            Annotation::PausePrompt { step: 1 },
            Annotation::Continued,
            Annotation::PausePrompt { step: 2 },
            Annotation::Continued,
            Annotation::PausePrompt { step: 3 },
            Annotation::SwitchedToAutomatic,
        ]
    );
}

#[test]
fn pausing_does_not_change_the_trace() {
    let (auto_report, auto_records) = run_traced("abcd").unwrap();

    let mut sink = MemorySink::default();
    let mut pause = ScriptedPause::switch_after(10);
    let stepped = stepping_machine().run("abcd", &mut sink, &mut pause).unwrap();

    assert_eq!(stepped, auto_report);
    assert_eq!(sink.records(), auto_records.as_slice());
}

#[test]
fn text_frames_match_trace_file_layout() {
    let mut sink = TextFrameSink::new(Vec::new());
    let mut pause = ScriptedPause::switch_after(1);
    let report = stepping_machine().run("ab", &mut sink, &mut pause).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();

    let blanks = "_".repeat(12);
    assert!(text.starts_with(&format!(
        "\nstep 0 | state: q_start\nTape: {blanks}ab{blanks}\n      {}^",
        " ".repeat(12)
    )));
    assert!(text.contains("step 1 | state: q_copy_reverse_start\n"));
    assert!(text.contains("[PROMPT] Press Enter for next action (or 'a' to auto)\n"));
    assert!(text.contains("[PROMPT-RESPONSE] step-by-step continue\n"));
    assert!(text.contains("[PROMPT-RESPONSE] automatic mode enabled\n"));
    assert!(text.contains("state: q_overlap_found_t=1\n"));
    assert!(text.contains(&format!("step {} | state: q_halt\n", report.steps)));
    assert_eq!(text.matches("[PROMPT]").count(), 2);
}
