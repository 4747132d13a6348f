//! Test helper functions for running the machine

#![allow(dead_code)]
use palindrome_machine::trace::{MemorySink, PauseMode, ScriptedPause};
use palindrome_machine::{MachineConfig, MachineError, PalindromeMachine, RunReport, TraceRecord};

/// Machine with the default tape layout that never pauses
pub fn auto_machine() -> PalindromeMachine {
    PalindromeMachine::new(MachineConfig::default().with_pause_mode(PauseMode::Automatic))
        .expect("default configuration is valid")
}

/// Machine with the default tape layout that pauses after every step
pub fn stepping_machine() -> PalindromeMachine {
    PalindromeMachine::new(MachineConfig::default()).expect("default configuration is valid")
}

/// Run automatically, keeping every trace record
pub fn run_traced(input: &str) -> Result<(RunReport, Vec<TraceRecord>), MachineError> {
    let mut sink = MemorySink::default();
    let mut pause = ScriptedPause::default();
    let report = auto_machine().run(input, &mut sink, &mut pause)?;
    Ok((report, sink.into_records()))
}

/// Shortest palindrome with prefix `word`, by trying every appended length
pub fn oracle(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    for j in 0..=chars.len() {
        let candidate: Vec<char> = chars
            .iter()
            .copied()
            .chain(chars[..j].iter().rev().copied())
            .collect();
        if candidate.iter().eq(candidate.iter().rev()) {
            return candidate.into_iter().collect();
        }
    }
    unreachable!("appending the full reverse always yields a palindrome")
}
