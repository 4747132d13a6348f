//! Head movement on a bounded tape

use std::fmt;

/// Head movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Move left (decrement position)
    Left,

    /// Move right (increment position)
    Right,

    /// Stay (no movement)
    Stay,
}

impl Move {
    /// Apply move to position on a tape of `capacity` cells
    ///
    /// Returns `None` when the move would leave `[0, capacity)`.
    pub fn apply(&self, position: usize, capacity: usize) -> Option<usize> {
        let next = match self {
            Move::Left => position.checked_sub(1)?,
            Move::Right => position.checked_add(1)?,
            Move::Stay => position,
        };
        (next < capacity).then_some(next)
    }

    /// Single-cell direction that brings `from` closer to `to`
    pub fn toward(from: usize, to: usize) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Less => Move::Right,
            std::cmp::Ordering::Greater => Move::Left,
            std::cmp::Ordering::Equal => Move::Stay,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => f.write_str("left"),
            Move::Right => f.write_str("right"),
            Move::Stay => f.write_str("stay"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_respects_bounds() {
        assert_eq!(Move::Left.apply(0, 10), None);
        assert_eq!(Move::Right.apply(9, 10), None);
        assert_eq!(Move::Right.apply(3, 10), Some(4));
        assert_eq!(Move::Left.apply(3, 10), Some(2));
        assert_eq!(Move::Stay.apply(3, 10), Some(3));
    }

    #[test]
    fn test_toward() {
        assert_eq!(Move::toward(2, 5), Move::Right);
        assert_eq!(Move::toward(5, 2), Move::Left);
        assert_eq!(Move::toward(4, 4), Move::Stay);
    }
}
