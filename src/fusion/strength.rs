//! Strength classification through an ordered rule chain.
//!
//! Rules are evaluated top-to-bottom; the first rule whose predicate holds
//! wins and later rules are unreachable. The order encodes a priority, not
//! an independent partition, so it must not be rearranged.

use crate::config::FusionConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// Tier thresholds. All comparisons are strict: a confidence of exactly 0.75
// does not qualify for VeryStrong.
const VERY_STRONG_CONFIDENCE: Decimal = dec!(0.75);
const VERY_STRONG_AGREEMENT: Decimal = dec!(0.85);
const STRONG_CONFIDENCE: Decimal = dec!(0.65);
const STRONG_AGREEMENT: Decimal = dec!(0.70);
const MODERATE_QUANT_CONFIDENCE: Decimal = dec!(0.70);
const MODERATE_QUAL_CONFIDENCE: Decimal = dec!(0.50);

/// Signal strength tier gating trade entry and position size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    Conflict,
    NoSignal,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStrength::VeryStrong => write!(f, "VeryStrong"),
            SignalStrength::Strong => write!(f, "Strong"),
            SignalStrength::Moderate => write!(f, "Moderate"),
            SignalStrength::Weak => write!(f, "Weak"),
            SignalStrength::Conflict => write!(f, "Conflict"),
            SignalStrength::NoSignal => write!(f, "NoSignal"),
        }
    }
}

/// The four values strength classification depends on. Same inputs always
/// yield the same tier.
#[derive(Debug, Clone, Copy)]
pub struct StrengthInputs {
    pub quant_confidence: Decimal,
    pub qual_confidence: Decimal,
    pub directional_match: bool,
    pub agreement_score: Decimal,
}

type RulePredicate = fn(&StrengthInputs, &FusionConfig) -> bool;

/// Ordered rule table, first match wins.
const RULES: [(SignalStrength, RulePredicate); 5] = [
    (SignalStrength::VeryStrong, |s, _| {
        s.directional_match
            && s.quant_confidence > VERY_STRONG_CONFIDENCE
            && s.qual_confidence > VERY_STRONG_CONFIDENCE
            && s.agreement_score > VERY_STRONG_AGREEMENT
    }),
    (SignalStrength::Strong, |s, _| {
        s.directional_match
            && s.quant_confidence > STRONG_CONFIDENCE
            && s.qual_confidence > STRONG_CONFIDENCE
            && s.agreement_score > STRONG_AGREEMENT
    }),
    (SignalStrength::Moderate, |s, _| {
        s.directional_match
            && s.quant_confidence > MODERATE_QUANT_CONFIDENCE
            && s.qual_confidence > MODERATE_QUAL_CONFIDENCE
    }),
    (SignalStrength::Weak, |s, cfg| {
        s.quant_confidence < cfg.min_quant_confidence
            || s.qual_confidence < cfg.min_qual_confidence
    }),
    (SignalStrength::Conflict, |s, _| !s.directional_match),
];

/// Classify the signal strength for one prediction pair.
///
/// Total over all well-formed inputs; falls through to `NoSignal` when no
/// rule fires.
pub fn classify_strength(inputs: &StrengthInputs, config: &FusionConfig) -> SignalStrength {
    RULES
        .iter()
        .find(|(_, applies)| applies(inputs, config))
        .map(|(strength, _)| *strength)
        .unwrap_or(SignalStrength::NoSignal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        quant_confidence: Decimal,
        qual_confidence: Decimal,
        directional_match: bool,
        agreement_score: Decimal,
    ) -> StrengthInputs {
        StrengthInputs {
            quant_confidence,
            qual_confidence,
            directional_match,
            agreement_score,
        }
    }

    #[test]
    fn test_very_strong_needs_all_conditions() {
        let cfg = FusionConfig::default();
        let tier = classify_strength(&inputs(dec!(0.80), dec!(0.80), true, dec!(0.90)), &cfg);
        assert_eq!(tier, SignalStrength::VeryStrong);
    }

    #[test]
    fn test_boundary_confidence_is_exclusive() {
        let cfg = FusionConfig::default();
        // Exactly 0.75 must NOT qualify for VeryStrong; it falls to Strong.
        let at_boundary = classify_strength(&inputs(dec!(0.75), dec!(0.80), true, dec!(0.90)), &cfg);
        assert_eq!(at_boundary, SignalStrength::Strong);

        let just_above =
            classify_strength(&inputs(dec!(0.7500001), dec!(0.80), true, dec!(0.90)), &cfg);
        assert_eq!(just_above, SignalStrength::VeryStrong);
    }

    #[test]
    fn test_boundary_agreement_is_exclusive() {
        let cfg = FusionConfig::default();
        // Agreement of exactly 0.85 falls through to Strong.
        let tier = classify_strength(&inputs(dec!(0.80), dec!(0.80), true, dec!(0.85)), &cfg);
        assert_eq!(tier, SignalStrength::Strong);
    }

    #[test]
    fn test_boundary_strong_confidence_is_exclusive() {
        let cfg = FusionConfig::default();
        // Exactly 0.65 on either side must NOT qualify for Strong; quant at
        // 0.65 also fails Moderate (not > 0.70) and falls to NoSignal.
        let quant_at = classify_strength(&inputs(dec!(0.65), dec!(0.80), true, dec!(0.80)), &cfg);
        assert_eq!(quant_at, SignalStrength::NoSignal);

        // Qual at exactly 0.65 fails Strong but quant 0.80 > 0.70 and
        // 0.65 > 0.50 keep Moderate reachable.
        let qual_at = classify_strength(&inputs(dec!(0.80), dec!(0.65), true, dec!(0.80)), &cfg);
        assert_eq!(qual_at, SignalStrength::Moderate);
    }

    #[test]
    fn test_boundary_strong_agreement_is_exclusive() {
        let cfg = FusionConfig::default();
        // Agreement of exactly 0.70 fails Strong; quant 0.72 > 0.70 and
        // qual 0.68 > 0.50 land on Moderate instead.
        let tier = classify_strength(&inputs(dec!(0.72), dec!(0.68), true, dec!(0.70)), &cfg);
        assert_eq!(tier, SignalStrength::Moderate);
    }

    #[test]
    fn test_boundary_weak_floor_is_exclusive() {
        let cfg = FusionConfig::default();
        // Exactly 0.60 is not below the floor, so Weak must NOT fire; with a
        // mismatch the pair classifies as Conflict instead.
        let tier = classify_strength(&inputs(dec!(0.60), dec!(0.60), false, dec!(0.40)), &cfg);
        assert_eq!(tier, SignalStrength::Conflict);

        // Just under the floor flips the same pair to Weak.
        let tier = classify_strength(&inputs(dec!(0.5999999), dec!(0.60), false, dec!(0.40)), &cfg);
        assert_eq!(tier, SignalStrength::Weak);
    }

    #[test]
    fn test_boundary_moderate_qual_confidence_is_exclusive() {
        let cfg = FusionConfig::default();
        // Qual at exactly 0.50 fails Moderate (not > 0.50) and sits below
        // the 0.60 floor, so the Weak rule fires.
        let tier = classify_strength(&inputs(dec!(0.72), dec!(0.50), true, dec!(0.60)), &cfg);
        assert_eq!(tier, SignalStrength::Weak);

        // Same pair with qual clear of both bounds fires Moderate.
        let above = classify_strength(&inputs(dec!(0.72), dec!(0.60), true, dec!(0.60)), &cfg);
        assert_eq!(above, SignalStrength::Moderate);
    }

    #[test]
    fn test_strong_tier() {
        let cfg = FusionConfig::default();
        let tier = classify_strength(&inputs(dec!(0.70), dec!(0.70), true, dec!(0.75)), &cfg);
        assert_eq!(tier, SignalStrength::Strong);
    }

    #[test]
    fn test_moderate_allows_lower_qual_confidence() {
        let cfg = FusionConfig::default();
        // Fails Strong (qual 0.60 not > 0.65) but quant > 0.70 and qual > 0.50.
        let tier = classify_strength(&inputs(dec!(0.72), dec!(0.60), true, dec!(0.60)), &cfg);
        assert_eq!(tier, SignalStrength::Moderate);
    }

    #[test]
    fn test_weak_outranks_conflict() {
        let cfg = FusionConfig::default();
        // Mismatched AND low confidence: the Weak rule fires first.
        let tier = classify_strength(&inputs(dec!(0.40), dec!(0.80), false, dec!(0.30)), &cfg);
        assert_eq!(tier, SignalStrength::Weak);
    }

    #[test]
    fn test_conflict_when_confident_but_mismatched() {
        let cfg = FusionConfig::default();
        let tier = classify_strength(&inputs(dec!(0.75), dec!(0.75), false, dec!(0.46)), &cfg);
        assert_eq!(tier, SignalStrength::Conflict);
    }

    #[test]
    fn test_no_signal_fallthrough() {
        let cfg = FusionConfig::default();
        // Matched, decent confidence, but quant not above 0.70 and neither
        // tier-1/2 condition holds: nothing fires.
        let tier = classify_strength(&inputs(dec!(0.62), dec!(0.62), true, dec!(0.60)), &cfg);
        assert_eq!(tier, SignalStrength::NoSignal);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let cfg = FusionConfig::default();
        let i = inputs(dec!(0.68), dec!(0.71), true, dec!(0.72));
        let first = classify_strength(&i, &cfg);
        for _ in 0..10 {
            assert_eq!(classify_strength(&i, &cfg), first);
        }
    }
}
