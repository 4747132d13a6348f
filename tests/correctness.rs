//! Correctness tests: machine output against the shortest-palindrome definition

use palindrome_machine::trace::MemorySink;
use palindrome_machine::util::is_palindrome;
use palindrome_machine::*;
use test_case::test_case;
mod test_helpers;
use test_helpers::*;

#[test_case("abc", "abcba", 1 ; "single trailing symbol overlaps")]
#[test_case("ab", "aba", 1 ; "two distinct symbols")]
#[test_case("abcd", "abcdcba", 1 ; "no repeated symbols")]
#[test_case("abb", "abba", 2 ; "even palindromic suffix")]
#[test_case("abcdc", "abcdcba", 3 ; "odd palindromic suffix")]
#[test_case("aacecaaa", "aacecaaacecaa", 3 ; "repeated trailing symbols")]
#[test_case("abab", "ababa", 3 ; "alternating")]
fn test_scenarios(input: &str, expected: &str, overlap: usize) {
    let report = auto_machine().run_automatic(input).expect("run succeeds");
    assert_eq!(report.palindrome, expected);
    assert_eq!(report.overlap, overlap);
    assert_eq!(report.appended, input.len() - overlap);
    assert!(!report.already_palindrome);
    assert_eq!(report.palindrome, oracle(input));
}

#[test]
fn test_abc_copy_region_holds_reverse() {
    let (report, records) = run_traced("abc").unwrap();
    // input + appended, then the blank gap, then the reversed copy
    assert!(report.tape_span.starts_with("abcba_"));
    assert!(report.tape_span.ends_with("_cba"));
    assert_eq!(report.tape_span.len(), 3 + 80 + 3);

    let copy_done = records
        .iter()
        .find(|r| r.label == StateLabel::CopyReverseDone)
        .expect("copy phase completes");
    assert!(copy_done.window_text().contains("_cba_"));
}

#[test_case("a" ; "single symbol")]
#[test_case("aa" ; "double symbol")]
#[test_case("racecar" ; "odd length")]
#[test_case("abba" ; "even length")]
fn test_palindrome_input_bypasses_phases(input: &str) {
    let (report, records) = run_traced(input).unwrap();
    assert_eq!(report.palindrome, input);
    assert!(report.already_palindrome);
    assert_eq!(report.steps, 0);
    assert_eq!(report.overlap, input.len());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label, StateLabel::Start);
}

#[test_case("abc" ; "short")]
#[test_case("banana" ; "repeated letters")]
#[test_case("qwertyuiop" ; "long")]
fn test_idempotence(input: &str) {
    let machine = auto_machine();
    let first = machine.run_automatic(input).unwrap();
    let second = machine.run_automatic(&first.palindrome).unwrap();
    assert!(second.already_palindrome);
    assert_eq!(second.palindrome, first.palindrome);
}

#[test]
fn test_empty_input_rejected_before_any_step() {
    let mut sink = MemorySink::default();
    let err = auto_machine()
        .run("", &mut sink, &mut trace::AutoRun)
        .unwrap_err();
    assert!(matches!(err, MachineError::InputRejected(RejectReason::Empty)));
    assert!(!err.is_fatal());
    assert!(sink.records().is_empty());
}

#[test]
fn test_over_long_input_rejected_without_touching_tape() {
    let machine = PalindromeMachine::new(
        MachineConfig::default()
            .with_max_input(5)
            .with_pause_mode(PauseMode::Automatic),
    )
    .unwrap();
    let mut sink = MemorySink::default();
    let err = machine
        .run("abcdef", &mut sink, &mut trace::AutoRun)
        .unwrap_err();
    assert!(matches!(
        err,
        MachineError::InputRejected(RejectReason::TooLong { len: 6, max: 5 })
    ));
    assert!(sink.records().is_empty());

    // Exactly at the limit is accepted.
    assert_eq!(machine.run_automatic("abcde").unwrap().palindrome, "abcdedcba");
}

#[test]
fn test_symbols_outside_alphabet_rejected() {
    for input in ["abC", "ab1", "a b", "é"] {
        let err = auto_machine().run_automatic(input).unwrap_err();
        assert!(
            matches!(err, MachineError::InputRejected(RejectReason::InvalidSymbol { .. })),
            "{input:?} should be rejected, got {err}"
        );
    }
}

#[test]
fn test_append_longer_than_gap() {
    // The appended tail runs past the 80-cell gap into copy cells that
    // have already been consumed.
    let input: String = "ab".repeat(60) + "c";
    let report = auto_machine().run_automatic(&input).unwrap();
    assert_eq!(report.appended, input.len() - 1);
    assert!(report.palindrome.starts_with(&input));
    assert!(is_palindrome(&report.palindrome));
    assert_eq!(report.palindrome, oracle(&input));
}

#[test]
fn test_small_tape_layout() {
    let machine = PalindromeMachine::new(
        MachineConfig::default()
            .with_tape(64, 4)
            .with_copy_gap(2)
            .with_max_input(20)
            .with_window_margin(3)
            .with_pause_mode(PauseMode::Automatic),
    )
    .unwrap();
    let report = machine.run_automatic("abcdefgh").unwrap();
    assert_eq!(report.palindrome, "abcdefghgfedcba");
}
