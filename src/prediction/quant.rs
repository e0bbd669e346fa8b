//! Quantitative prediction record from the ensemble-model collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Direction forecast by the ensemble model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantDirection {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for QuantDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantDirection::Up => write!(f, "Up"),
            QuantDirection::Down => write!(f, "Down"),
            QuantDirection::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Directional forecast derived from the ensemble model's return estimate.
///
/// Immutable once produced. `internal_agreement` measures how much the
/// sub-models inside the ensemble agree with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantPrediction {
    pub direction: QuantDirection,
    /// Confidence in [0,1]
    pub confidence: Decimal,
    /// Predicted return as a signed percentage (e.g., 0.03 = +3%)
    pub predicted_return: Decimal,
    /// Cross-sub-model agreement in [0,1]
    pub internal_agreement: Decimal,
    /// Per-sub-model contributions to the estimate, for audit
    #[serde(default)]
    pub contributions: HashMap<String, Decimal>,
    /// Diagnostic note set when the prediction is a degraded fallback
    #[serde(default)]
    pub diagnostic: Option<String>,
}

impl QuantPrediction {
    /// Build a prediction from a raw return estimate.
    ///
    /// The sign of the estimate sets the direction; its magnitude is scaled
    /// by `confidence_scale` (clamped to 1.0) into a confidence when the
    /// predictor supplies none of its own.
    pub fn from_return_estimate(
        estimate: Decimal,
        internal_agreement: Decimal,
        contributions: HashMap<String, Decimal>,
        confidence_scale: Decimal,
    ) -> Self {
        let direction = if estimate > Decimal::ZERO {
            QuantDirection::Up
        } else if estimate < Decimal::ZERO {
            QuantDirection::Down
        } else {
            QuantDirection::Neutral
        };

        let confidence = (estimate.abs() / confidence_scale).min(Decimal::ONE);

        Self {
            direction,
            confidence,
            predicted_return: estimate,
            internal_agreement,
            contributions,
            diagnostic: None,
        }
    }

    /// Neutral zero-confidence prediction substituted when the ensemble
    /// boundary fails. Keeps the fusion inputs well-formed.
    pub fn neutral_fallback(reason: impl Into<String>) -> Self {
        Self {
            direction: QuantDirection::Neutral,
            confidence: Decimal::ZERO,
            predicted_return: Decimal::ZERO,
            internal_agreement: Decimal::ZERO,
            contributions: HashMap::new(),
            diagnostic: Some(reason.into()),
        }
    }

    /// True when this is a degraded fallback rather than a model output.
    pub fn is_fallback(&self) -> bool {
        self.diagnostic.is_some()
    }
}
