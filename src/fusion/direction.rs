//! Direction normalization across the two prediction vocabularies.

use crate::prediction::{QualDirection, QuantDirection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared direction domain both predictions normalize into before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Bullish => write!(f, "Bullish"),
            Direction::Bearish => write!(f, "Bearish"),
            Direction::Neutral => write!(f, "Neutral"),
        }
    }
}

impl From<QuantDirection> for Direction {
    fn from(d: QuantDirection) -> Self {
        match d {
            QuantDirection::Up => Direction::Bullish,
            QuantDirection::Down => Direction::Bearish,
            QuantDirection::Neutral => Direction::Neutral,
        }
    }
}

impl From<QualDirection> for Direction {
    fn from(d: QualDirection) -> Self {
        match d {
            QualDirection::Bullish => Direction::Bullish,
            QualDirection::Bearish => Direction::Bearish,
            QualDirection::Neutral => Direction::Neutral,
        }
    }
}

/// Whether the two normalized directions agree for trading purposes.
///
/// Two Neutral directions do NOT count as a match: a double-neutral pair
/// must never gate toward an entry, so it is kept out of the match set.
pub fn directional_match(quant: Direction, qualitative: Direction) -> bool {
    quant == qualitative && quant != Direction::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quant_vocabulary_normalizes() {
        assert_eq!(Direction::from(QuantDirection::Up), Direction::Bullish);
        assert_eq!(Direction::from(QuantDirection::Down), Direction::Bearish);
        assert_eq!(Direction::from(QuantDirection::Neutral), Direction::Neutral);
    }

    #[test]
    fn test_qual_vocabulary_passes_through() {
        assert_eq!(Direction::from(QualDirection::Bullish), Direction::Bullish);
        assert_eq!(Direction::from(QualDirection::Bearish), Direction::Bearish);
        assert_eq!(Direction::from(QualDirection::Neutral), Direction::Neutral);
    }

    #[test]
    fn test_aligned_directions_match() {
        assert!(directional_match(Direction::Bullish, Direction::Bullish));
        assert!(directional_match(Direction::Bearish, Direction::Bearish));
        assert!(!directional_match(Direction::Bullish, Direction::Bearish));
        assert!(!directional_match(Direction::Bearish, Direction::Neutral));
    }

    // Flags existing behavior on purpose: whether double-neutral should count
    // as agreement is an open question upstream; current logic says no.
    #[test]
    fn test_double_neutral_is_not_a_match() {
        assert!(!directional_match(Direction::Neutral, Direction::Neutral));
    }
}
