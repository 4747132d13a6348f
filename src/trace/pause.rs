//! Pause control between traced steps

use super::StateLabel;
use std::collections::VecDeque;

/// Outcome of a pause query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseDecision {
    /// Take one more step, then ask again
    Continue,
    /// Stop asking for the rest of the run
    SwitchToAutomatic,
}

/// Initial pausing behavior of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseMode {
    /// Consult the controller after every step
    #[default]
    Stepping,
    /// Never consult the controller
    Automatic,
}

/// Decides whether a stepping run keeps pausing
///
/// Implementations may block (e.g. on a terminal) but must eventually
/// return one of the two decisions.
pub trait PauseController {
    /// Called after each traced step while the run is stepping
    fn decide(&mut self, step: u64, state: StateLabel) -> PauseDecision;
}

impl<T: PauseController + ?Sized> PauseController for &mut T {
    fn decide(&mut self, step: u64, state: StateLabel) -> PauseDecision {
        (**self).decide(step, state)
    }
}

/// Controller that switches to automatic on the first query
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRun;

impl PauseController for AutoRun {
    fn decide(&mut self, _step: u64, _state: StateLabel) -> PauseDecision {
        PauseDecision::SwitchToAutomatic
    }
}

/// Replays a fixed queue of decisions
///
/// Answers `Continue` once the queue is exhausted and records every query.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPause {
    script: VecDeque<PauseDecision>,
    queries: Vec<(u64, StateLabel)>,
}

impl ScriptedPause {
    /// Controller answering with `decisions` in order
    pub fn new(decisions: impl IntoIterator<Item = PauseDecision>) -> Self {
        Self {
            script: decisions.into_iter().collect(),
            queries: Vec::new(),
        }
    }

    /// Continue for `steps` queries, then switch to automatic
    pub fn switch_after(steps: usize) -> Self {
        let mut script = vec![PauseDecision::Continue; steps];
        script.push(PauseDecision::SwitchToAutomatic);
        Self::new(script)
    }

    /// Every `(step, state)` the controller was asked about
    pub fn queries(&self) -> &[(u64, StateLabel)] {
        &self.queries
    }
}

impl PauseController for ScriptedPause {
    fn decide(&mut self, step: u64, state: StateLabel) -> PauseDecision {
        self.queries.push((step, state));
        self.script.pop_front().unwrap_or(PauseDecision::Continue)
    }
}
