//! Single-tape machine representation
//!
//! Provides the pieces the phases operate on:
//! - Bounded tape with one head
//! - Single-cell head moves
//! - Machine state holding the input and copy regions
//!
//! Symbols are drawn from lowercase letters (unmarked), uppercase letters
//! (marked during the copy phase) and the blank `_`.

mod state;
mod tape;
mod transition;

pub use state::MachineState;
pub use tape::Tape;
pub use transition::Move;

/// Tape symbol
pub type Symbol = char;

/// Blank symbol (content of every unwritten cell)
pub const BLANK: Symbol = '_';

/// Lowercase letter: input symbol not yet copied
pub fn is_unmarked(symbol: Symbol) -> bool {
    symbol.is_ascii_lowercase()
}

/// Uppercase letter: input symbol copied, awaiting restoration
pub fn is_marked(symbol: Symbol) -> bool {
    symbol.is_ascii_uppercase()
}

/// Symbols of a word, one per cell
pub fn symbols(word: &str) -> Vec<Symbol> {
    word.chars().collect()
}
