//! Qualitative prediction record from the LLM consensus collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of key factors extracted from consensus reasoning.
pub const MAX_KEY_FACTORS: usize = 5;

/// Direction voted by the provider consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for QualDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualDirection::Bullish => write!(f, "Bullish"),
            QualDirection::Bearish => write!(f, "Bearish"),
            QualDirection::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Narrative-model directional forecast with supporting reasoning.
///
/// Immutable once produced. `internal_agreement` measures cross-provider
/// agreement within the consensus round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitativePrediction {
    pub direction: QualDirection,
    /// Confidence in [0,1]
    pub confidence: Decimal,
    /// Full reasoning text from the consensus round
    pub reasoning: String,
    /// Up to [`MAX_KEY_FACTORS`] bullet-style factors lifted from the reasoning
    pub key_factors: Vec<String>,
    /// Cross-provider agreement in [0,1]
    pub internal_agreement: Decimal,
}

impl QualitativePrediction {
    /// Build a prediction from a raw consensus signal, extracting key
    /// factors from the reasoning text.
    pub fn from_consensus(
        direction: QualDirection,
        confidence: Decimal,
        reasoning: String,
        internal_agreement: Decimal,
    ) -> Self {
        let key_factors = extract_key_factors(&reasoning);
        Self {
            direction,
            confidence,
            reasoning,
            key_factors,
            internal_agreement,
        }
    }

    /// Neutral zero-confidence prediction substituted when the consensus
    /// boundary fails. Keeps the fusion inputs well-formed.
    pub fn neutral_fallback(reason: impl Into<String>) -> Self {
        Self {
            direction: QualDirection::Neutral,
            confidence: Decimal::ZERO,
            reasoning: reason.into(),
            key_factors: Vec::new(),
            internal_agreement: Decimal::ZERO,
        }
    }
}

/// Extract up to [`MAX_KEY_FACTORS`] bullet-style factors from reasoning text.
///
/// A factor line starts with a bullet marker (`-`, `*`, `•`) or a numeral
/// followed by `.` or `)`. The marker is stripped and the rest trimmed.
pub fn extract_key_factors(reasoning: &str) -> Vec<String> {
    reasoning
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let body = if let Some(rest) = line
                .strip_prefix('-')
                .or_else(|| line.strip_prefix('*'))
                .or_else(|| line.strip_prefix('•'))
            {
                rest
            } else {
                let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
                if digits == 0 {
                    return None;
                }
                let rest = &line[digits..];
                rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?
            };
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .take(MAX_KEY_FACTORS)
        .collect()
}
