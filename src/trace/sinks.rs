//! Provided trace sinks

use super::{Annotation, TraceRecord, TraceSink};
use std::io::{self, Write};

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _record: &TraceRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every record and annotation in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<TraceRecord>,
    annotations: Vec<Annotation>,
}

impl MemorySink {
    /// Records in emission order
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Annotations in emission order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<TraceRecord> {
        self.records
    }
}

impl TraceSink for MemorySink {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        self.annotations.push(note);
        Ok(())
    }
}

/// Multi-line frames: header, tape window, caret under the head
///
/// ```text
///
/// step 3 | state: move_right
/// Tape: ____abc____
///           ^
/// ```
#[derive(Debug)]
pub struct TextFrameSink<W: Write> {
    out: W,
}

impl<W: Write> TextFrameSink<W> {
    /// Render frames into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TextFrameSink<W> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "step {} | state: {}", record.step, record.state)?;
        writeln!(self.out, "Tape: {}", record.window_text())?;
        writeln!(self.out, "      {}", record.head_marker())?;
        self.out.flush()
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        match note {
            Annotation::PausePrompt { .. } => writeln!(
                self.out,
                "[PROMPT] Press Enter for next action (or 'a' to auto)"
            )?,
            Annotation::Continued => writeln!(self.out, "[PROMPT-RESPONSE] step-by-step continue")?,
            Annotation::SwitchedToAutomatic => {
                writeln!(self.out, "[PROMPT-RESPONSE] automatic mode enabled")?
            }
        }
        self.out.flush()
    }
}

/// One status line per step
#[derive(Debug)]
pub struct StatusLineSink<W: Write> {
    out: W,
    note: Option<String>,
}

impl<W: Write> StatusLineSink<W> {
    /// Print status lines into `out`
    pub fn new(out: W) -> Self {
        Self { out, note: None }
    }

    /// Append `note` to every line (e.g. where the full frames go)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl<W: Write> TraceSink for StatusLineSink<W> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        write!(
            self.out,
            "step {} | state: {} | head={}",
            record.step, record.state, record.head
        )?;
        if let Some(note) = &self.note {
            write!(self.out, " ({note})")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// blake3 fingerprint of the whole trace
///
/// Two runs with the same fingerprint emitted the same steps, labels,
/// windows and head positions.
#[derive(Debug, Clone, Default)]
pub struct DigestSink {
    hasher: blake3::Hasher,
    records: u64,
}

impl DigestSink {
    /// Number of records hashed so far
    pub fn len(&self) -> u64 {
        self.records
    }

    /// Whether nothing has been hashed
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Fingerprint of everything hashed so far
    pub fn finalize(&self) -> blake3::Hash {
        self.hasher.finalize()
    }

    /// Length-prefixed, so adjacent fields cannot run into each other
    fn update_text(&mut self, text: &str) {
        self.hasher.update(&(text.len() as u64).to_le_bytes());
        self.hasher.update(text.as_bytes());
    }
}

impl TraceSink for DigestSink {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        self.hasher.update(&record.step.to_le_bytes());
        self.update_text(&record.state);
        self.hasher.update(&(record.window_start as u64).to_le_bytes());
        self.update_text(&record.window_text());
        self.hasher.update(&(record.head as u64).to_le_bytes());
        self.records += 1;
        Ok(())
    }
}

/// One JSON object per record
#[cfg(feature = "visualize")]
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

#[cfg(feature = "visualize")]
impl<W: Write> JsonLinesSink<W> {
    /// Write JSON lines into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[cfg(feature = "visualize")]
impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }

    fn annotate(&mut self, note: Annotation) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &note)?;
        writeln!(self.out)
    }
}
