//! Quantitative signal boundary around the ensemble-model collaborator.

use crate::config::PipelineConfig;
use crate::error::SignalError;
use crate::market::{Candle, FeatureMatrix};
use crate::prediction::QuantPrediction;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds a fixed-width numeric feature matrix from a recent OHLCV window.
///
/// Implementations own feature engineering; the boundary only checks that
/// enough clean rows come back for the ensemble to run on.
#[cfg_attr(test, mockall::automock)]
pub trait FeatureProvider: Send + Sync {
    fn features(&self, pair: &str, candles: &[Candle]) -> anyhow::Result<FeatureMatrix>;
}

/// Raw output of one ensemble prediction run.
#[derive(Debug, Clone)]
pub struct EnsembleOutput {
    /// Return estimates as signed percentages, most recent last
    pub estimates: Vec<Decimal>,
    /// Cross-sub-model agreement in [0,1]
    pub internal_agreement: Decimal,
    /// Per-sub-model contributions for audit
    pub contributions: HashMap<String, Decimal>,
    /// Confidence supplied by the model itself, when it has one
    pub confidence: Option<Decimal>,
}

/// The ensemble model behind its serving boundary.
#[cfg_attr(test, mockall::automock)]
pub trait EnsemblePredictor: Send + Sync {
    fn predict(&self, features: &FeatureMatrix) -> anyhow::Result<EnsembleOutput>;
}

/// Boundary wrapper producing a well-formed [`QuantPrediction`] no matter
/// what the collaborators do. Failures fold to a neutral fallback; the
/// fusion engine never sees an error from this side.
pub struct QuantSignalSource {
    features: Arc<dyn FeatureProvider>,
    predictor: Arc<dyn EnsemblePredictor>,
    config: PipelineConfig,
}

impl QuantSignalSource {
    pub fn new(
        features: Arc<dyn FeatureProvider>,
        predictor: Arc<dyn EnsemblePredictor>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            features,
            predictor,
            config,
        }
    }

    /// Produce the quantitative prediction for a pair.
    pub fn predict(&self, pair: &str, candles: &[Candle]) -> QuantPrediction {
        match self.try_predict(pair, candles) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(pair, error = %e, "Quant signal degraded to neutral");
                QuantPrediction::neutral_fallback(e.to_string())
            }
        }
    }

    fn try_predict(&self, pair: &str, candles: &[Candle]) -> Result<QuantPrediction, SignalError> {
        let features = self.features.features(pair, candles)?;

        let clean_rows = features.clean_row_count();
        if clean_rows < self.config.min_feature_rows {
            return Err(SignalError::InsufficientData {
                rows: clean_rows,
                min_rows: self.config.min_feature_rows,
            });
        }

        let output = self.predictor.predict(&features)?;
        let estimate = *output
            .estimates
            .last()
            .ok_or_else(|| SignalError::Malformed("empty estimate sequence".to_string()))?;

        let mut prediction = QuantPrediction::from_return_estimate(
            estimate,
            output.internal_agreement.clamp(Decimal::ZERO, Decimal::ONE),
            output.contributions,
            self.config.return_confidence_scale,
        );
        // Prefer the model's own confidence when it supplies one.
        if let Some(confidence) = output.confidence {
            prediction.confidence = confidence.clamp(Decimal::ZERO, Decimal::ONE);
        }

        debug!(
            pair,
            direction = %prediction.direction,
            confidence = %prediction.confidence,
            estimate = %estimate,
            clean_rows,
            "Ensemble prediction"
        );

        Ok(prediction)
    }
}
