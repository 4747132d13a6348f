//! Bounded single tape with one read/write head

use super::{Move, Symbol, BLANK};
use crate::MachineError;

/// Fixed-capacity tape
///
/// Unlike an unbounded Turing tape, every access is checked against
/// `[0, capacity)` and a violation surfaces as [`MachineError::Bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tape {
    /// Dense storage, one symbol per cell
    cells: Vec<Symbol>,

    /// Head position
    head: usize,
}

impl Tape {
    /// Create an all-blank tape with the head on cell 0
    pub fn blank(capacity: usize) -> Self {
        Self {
            cells: vec![BLANK; capacity],
            head: 0,
        }
    }

    /// Number of addressable cells
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Current head position
    pub fn head(&self) -> usize {
        self.head
    }

    /// Read symbol under the head
    pub fn read(&self) -> Symbol {
        self.cells[self.head]
    }

    /// Write symbol under the head
    pub fn write(&mut self, symbol: Symbol) {
        self.cells[self.head] = symbol;
    }

    /// Shift the head one cell left
    pub fn move_left(&mut self) -> Result<(), MachineError> {
        self.step(Move::Left)
    }

    /// Shift the head one cell right
    pub fn move_right(&mut self) -> Result<(), MachineError> {
        self.step(Move::Right)
    }

    /// Apply a single-cell move
    pub fn step(&mut self, direction: Move) -> Result<(), MachineError> {
        self.head = direction
            .apply(self.head, self.capacity())
            .ok_or(MachineError::Bounds {
                position: self.head,
                direction,
            })?;
        Ok(())
    }

    /// Inspect an arbitrary cell without moving the head
    pub fn peek(&self, position: usize) -> Result<Symbol, MachineError> {
        self.cells
            .get(position)
            .copied()
            .ok_or(MachineError::Bounds {
                position,
                direction: Move::Stay,
            })
    }

    /// Place `symbols` on consecutive cells starting at `start`
    ///
    /// Fails without touching the tape if the run would not fit.
    pub fn load(&mut self, start: usize, symbols: &[Symbol]) -> Result<(), MachineError> {
        let end = start + symbols.len();
        if end > self.capacity() {
            return Err(MachineError::Bounds {
                position: end - 1,
                direction: Move::Stay,
            });
        }
        self.cells[start..end].copy_from_slice(symbols);
        Ok(())
    }

    /// Cells `[left, right]`, clipped to the tape
    ///
    /// Returns the clipped start together with the slice.
    pub fn window(&self, left: usize, right: usize) -> (usize, &[Symbol]) {
        let last = self.capacity().saturating_sub(1);
        let right = right.min(last);
        let left = left.min(right);
        (left, &self.cells[left..=right])
    }

    /// Contents of `[start, end]` as a string
    pub fn span(&self, start: usize, end: usize) -> Result<String, MachineError> {
        if end >= self.capacity() {
            return Err(MachineError::Bounds {
                position: end,
                direction: Move::Stay,
            });
        }
        if start > end {
            return Ok(String::new());
        }
        Ok(self.cells[start..=end].iter().collect())
    }
}
