//! Fusion of the two predictions into an actionable decision record.

use crate::config::FusionConfig;
use crate::fusion::agreement::agreement_score;
use crate::fusion::direction::{directional_match, Direction};
use crate::fusion::strength::{classify_strength, SignalStrength, StrengthInputs};
use crate::prediction::{QualitativePrediction, QuantPrediction};
use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

// Combined-confidence weights: the quantitative side is the primary
// statistical signal and carries more weight.
const QUANT_WEIGHT: Decimal = dec!(0.6);
const QUAL_WEIGHT: Decimal = dec!(0.4);
const AGREEMENT_WEIGHT: Decimal = dec!(0.4);
const AGREEMENT_MIDPOINT: Decimal = dec!(0.5);

// Position sizing per tier.
const VERY_STRONG_BASE_SIZE: Decimal = dec!(1.0);
const VERY_STRONG_MAX_SIZE: Decimal = dec!(1.5);
const VERY_STRONG_SIZE_SLOPE: Decimal = dec!(0.5);
const MODERATE_BASE_SIZE: Decimal = dec!(0.5);
const MODERATE_SIZE_SLOPE: Decimal = dec!(0.2);

/// What the strategy layer should do with the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    EnterLong,
    EnterLongReduced,
    EnterShort,
    EnterShortReduced,
    Wait,
    WaitConflict,
}

impl TradeAction {
    /// True for the four entry variants.
    pub fn is_entry(&self) -> bool {
        !matches!(self, TradeAction::Wait | TradeAction::WaitConflict)
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::EnterLong => write!(f, "EnterLong"),
            TradeAction::EnterLongReduced => write!(f, "EnterLongReduced"),
            TradeAction::EnterShort => write!(f, "EnterShort"),
            TradeAction::EnterShortReduced => write!(f, "EnterShortReduced"),
            TradeAction::Wait => write!(f, "Wait"),
            TradeAction::WaitConflict => write!(f, "WaitConflict"),
        }
    }
}

/// Auditable fusion output. Created once per fusion call and never mutated;
/// the order-placement side reads `action` and `position_size_multiplier`,
/// audit trails read the rest.
#[derive(Debug, Clone, Serialize)]
pub struct FusionDecision {
    pub pair: String,
    pub action: TradeAction,
    pub strength: SignalStrength,
    /// Blended confidence in [0,1]
    pub combined_confidence: Decimal,
    /// Agreement between the two inputs in [0,1]
    pub agreement_score: Decimal,
    /// Size scaling in [0,1.5]; always 0 for Wait/WaitConflict
    pub position_size_multiplier: Decimal,
    /// Inputs embedded by value for audit
    pub quant_input: QuantPrediction,
    pub qualitative_input: QualitativePrediction,
    pub reasoning: String,
    pub decided_at: DateTime<Utc>,
}

impl FusionDecision {
    /// Serialize the full decision record, inputs included, for audit logs
    /// and downstream storage.
    pub fn audit_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Failed to serialize fusion decision")
    }
}

/// Fuses a quantitative and a qualitative prediction into a decision.
///
/// Pure apart from log emission: same inputs and config always produce the
/// same action, strength, scores, and multiplier.
pub struct FusionEngine {
    config: FusionConfig,
}

impl FusionEngine {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Fuse one prediction pair into a decision record.
    pub fn fuse(
        &self,
        pair: &str,
        quant: QuantPrediction,
        qualitative: QualitativePrediction,
    ) -> FusionDecision {
        let quant_direction = Direction::from(quant.direction);
        let qual_direction = Direction::from(qualitative.direction);
        let matched = directional_match(quant_direction, qual_direction);

        let agreement = agreement_score(&quant, &qualitative);

        let strength = classify_strength(
            &StrengthInputs {
                quant_confidence: quant.confidence,
                qual_confidence: qualitative.confidence,
                directional_match: matched,
                agreement_score: agreement,
            },
            &self.config,
        );

        let combined_confidence =
            combined_confidence(quant.confidence, qualitative.confidence, agreement);

        let (mut action, mut multiplier) =
            action_and_size(strength, quant_direction, combined_confidence);

        debug!(
            pair,
            %quant_direction,
            %qual_direction,
            matched,
            %agreement,
            %strength,
            "Classified prediction pair"
        );

        // Entry veto: an entry-grade tier still needs the configured minimum
        // agreement before capital is committed.
        let vetoed = action.is_entry() && agreement < self.config.min_agreement_score;
        if vetoed {
            action = TradeAction::Wait;
            multiplier = Decimal::ZERO;
        }

        let reasoning = build_reasoning(
            pair,
            strength,
            action,
            quant_direction,
            qual_direction,
            &quant,
            &qualitative,
            agreement,
            combined_confidence,
            vetoed,
        );

        info!(
            pair,
            %action,
            %strength,
            combined_confidence = %combined_confidence.round_dp(4),
            agreement = %agreement.round_dp(4),
            multiplier = %multiplier.round_dp(4),
            "Fusion decision"
        );

        FusionDecision {
            pair: pair.to_string(),
            action,
            strength,
            combined_confidence,
            agreement_score: agreement,
            position_size_multiplier: multiplier,
            quant_input: quant,
            qualitative_input: qualitative,
            reasoning,
            decided_at: Utc::now(),
        }
    }
}

/// Weighted confidence blend, clamped to [0,1].
///
/// The agreement term only ever adds and only above the "at least
/// directionally aligned" midpoint of 0.5.
fn combined_confidence(
    quant_confidence: Decimal,
    qual_confidence: Decimal,
    agreement: Decimal,
) -> Decimal {
    let agreement_term = ((agreement - AGREEMENT_MIDPOINT) * AGREEMENT_WEIGHT).max(Decimal::ZERO);
    (quant_confidence * QUANT_WEIGHT + qual_confidence * QUAL_WEIGHT + agreement_term)
        .clamp(Decimal::ZERO, Decimal::ONE)
}

/// Map a strength tier to an action and a position-size multiplier.
///
/// The quantitative side supplies the sign. Entry tiers imply a directional
/// match, which excludes Neutral, but a Neutral quant direction still folds
/// to Wait so the mapping stays total.
fn action_and_size(
    strength: SignalStrength,
    quant_direction: Direction,
    combined_confidence: Decimal,
) -> (TradeAction, Decimal) {
    match strength {
        SignalStrength::VeryStrong => {
            let size = (VERY_STRONG_BASE_SIZE + combined_confidence * VERY_STRONG_SIZE_SLOPE)
                .clamp(VERY_STRONG_BASE_SIZE, VERY_STRONG_MAX_SIZE);
            entry_for(quant_direction, TradeAction::EnterLong, TradeAction::EnterShort, size)
        }
        SignalStrength::Strong => entry_for(
            quant_direction,
            TradeAction::EnterLong,
            TradeAction::EnterShort,
            Decimal::ONE,
        ),
        SignalStrength::Moderate => {
            let size = MODERATE_BASE_SIZE + combined_confidence * MODERATE_SIZE_SLOPE;
            entry_for(
                quant_direction,
                TradeAction::EnterLongReduced,
                TradeAction::EnterShortReduced,
                size,
            )
        }
        SignalStrength::Conflict => (TradeAction::WaitConflict, Decimal::ZERO),
        SignalStrength::Weak | SignalStrength::NoSignal => (TradeAction::Wait, Decimal::ZERO),
    }
}

fn entry_for(
    direction: Direction,
    long: TradeAction,
    short: TradeAction,
    size: Decimal,
) -> (TradeAction, Decimal) {
    match direction {
        Direction::Bullish => (long, size),
        Direction::Bearish => (short, size),
        Direction::Neutral => (TradeAction::Wait, Decimal::ZERO),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_reasoning(
    pair: &str,
    strength: SignalStrength,
    action: TradeAction,
    quant_direction: Direction,
    qual_direction: Direction,
    quant: &QuantPrediction,
    qualitative: &QualitativePrediction,
    agreement: Decimal,
    combined_confidence: Decimal,
    vetoed: bool,
) -> String {
    let mut reasoning = format!(
        "{strength} -> {action} on {pair}: quant {quant_direction} \
         (confidence {}, predicted return {}%), consensus {qual_direction} \
         (confidence {}), agreement {}, combined confidence {}.",
        quant.confidence.round_dp(2),
        quant.predicted_return.round_dp(2),
        qualitative.confidence.round_dp(2),
        agreement.round_dp(2),
        combined_confidence.round_dp(2),
    );

    if !qualitative.key_factors.is_empty() {
        reasoning.push_str(" Key factors: ");
        reasoning.push_str(&qualitative.key_factors.join("; "));
        reasoning.push('.');
    }

    if let Some(diagnostic) = &quant.diagnostic {
        reasoning.push_str(" Quant degraded: ");
        reasoning.push_str(diagnostic);
        reasoning.push('.');
    }

    if vetoed {
        reasoning.push_str(" Entry vetoed: agreement below configured floor.");
    }

    reasoning
}
