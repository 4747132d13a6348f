//! Step counter, state label and frame emission

use super::{
    Annotation, PauseController, PauseDecision, PauseMode, Phase, StateLabel, TraceRecord,
    TraceSink,
};
use crate::machine::MachineState;
use crate::MachineError;

/// Wraps every traced action of a run
///
/// Each action goes through [`mark`](Self::mark), [`emit_frame`](Self::emit_frame)
/// and [`maybe_pause`](Self::maybe_pause), in that order ([`trace`](Self::trace)).
pub struct StepTracer<'a> {
    sink: &'a mut dyn TraceSink,
    pause: &'a mut dyn PauseController,
    step: u64,
    label: StateLabel,
    phase: Phase,
    automatic: bool,
}

impl std::fmt::Debug for StepTracer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTracer")
            .field("step", &self.step)
            .field("label", &self.label)
            .field("phase", &self.phase)
            .field("automatic", &self.automatic)
            .finish_non_exhaustive()
    }
}

impl<'a> StepTracer<'a> {
    /// Tracer at step 0 in the `Start` phase
    pub fn new(
        sink: &'a mut dyn TraceSink,
        pause: &'a mut dyn PauseController,
        mode: PauseMode,
    ) -> Self {
        Self {
            sink,
            pause,
            step: 0,
            label: StateLabel::Start,
            phase: Phase::Start,
            automatic: mode == PauseMode::Automatic,
        }
    }

    /// Steps taken so far
    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Current state label
    pub fn label(&self) -> StateLabel {
        self.label
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether pausing has been switched off
    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Advance to the next phase
    ///
    /// Only the immediate successor of the current phase is accepted.
    pub fn enter_phase(&mut self, phase: Phase) -> Result<(), MachineError> {
        if self.phase.next() != Some(phase) {
            return Err(MachineError::PhaseOrder {
                from: self.phase,
                to: phase,
            });
        }
        tracing::debug!(from = %self.phase, to = %phase, step = self.step, "phase transition");
        self.phase = phase;
        Ok(())
    }

    /// Set the label and count one step
    pub fn mark(&mut self, label: StateLabel) {
        self.label = label;
        self.step += 1;
    }

    /// Send the current frame to the sink
    pub fn emit_frame(&mut self, state: &MachineState) -> Result<(), MachineError> {
        let (left, right) = state.frame_bounds();
        let (window_start, cells) = state.tape().window(left, right);
        let head = state.head();
        let record = TraceRecord {
            step: self.step,
            phase: self.phase,
            state: self.label.to_string(),
            label: self.label,
            window_start,
            window: cells.to_vec(),
            head,
            head_offset: head as isize - window_start as isize,
        };
        self.sink.record(&record)?;
        Ok(())
    }

    /// Consult the pause controller unless the run is automatic
    pub fn maybe_pause(&mut self) -> Result<(), MachineError> {
        if self.automatic {
            return Ok(());
        }
        self.sink.annotate(Annotation::PausePrompt { step: self.step })?;
        match self.pause.decide(self.step, self.label) {
            PauseDecision::Continue => self.sink.annotate(Annotation::Continued)?,
            PauseDecision::SwitchToAutomatic => {
                tracing::info!(step = self.step, "switched to automatic mode");
                self.automatic = true;
                self.sink.annotate(Annotation::SwitchedToAutomatic)?;
            }
        }
        Ok(())
    }

    /// `mark` + `emit_frame` + `maybe_pause`
    pub fn trace(&mut self, label: StateLabel, state: &MachineState) -> Result<(), MachineError> {
        self.mark(label);
        self.emit_frame(state)?;
        self.maybe_pause()
    }

    /// Enter `Halted` and emit the final frame (no pause)
    pub fn halt(&mut self, state: &MachineState) -> Result<(), MachineError> {
        self.enter_phase(Phase::Halted)?;
        self.mark(StateLabel::Halt);
        self.emit_frame(state)
    }
}
