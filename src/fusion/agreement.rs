//! Agreement scoring between the two predictions.

use crate::fusion::direction::{directional_match, Direction};
use crate::prediction::{QualitativePrediction, QuantPrediction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Score awarded for directional alignment alone.
const DIRECTIONAL_BASE: Decimal = dec!(0.5);
/// Weight of the confidence-alignment bonus.
const CONFIDENCE_WEIGHT: Decimal = dec!(0.3);
/// Weight of the internal-agreement bonus.
const INTERNAL_WEIGHT: Decimal = dec!(0.2);

/// Blended agreement score in [0,1].
///
/// Additive: directional base + confidence-alignment bonus +
/// internal-agreement bonus, capped at 1.0. The asymmetry is intentional:
/// the two bonuses together cap at 0.5, so a directional mismatch can never
/// push the score above 0.5 regardless of how confident or internally
/// consistent each side is.
pub fn agreement_score(quant: &QuantPrediction, qualitative: &QualitativePrediction) -> Decimal {
    let matched = directional_match(
        Direction::from(quant.direction),
        Direction::from(qualitative.direction),
    );

    let base = if matched {
        DIRECTIONAL_BASE
    } else {
        Decimal::ZERO
    };

    let confidence_bonus =
        (Decimal::ONE - (quant.confidence - qualitative.confidence).abs()) * CONFIDENCE_WEIGHT;

    let internal_bonus =
        (quant.internal_agreement + qualitative.internal_agreement) / dec!(2) * INTERNAL_WEIGHT;

    (base + confidence_bonus + internal_bonus).min(Decimal::ONE)
}
