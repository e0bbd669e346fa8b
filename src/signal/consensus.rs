//! Qualitative signal boundary around the LLM consensus collaborator.

use crate::error::SignalError;
use crate::market::{Candle, Timeframe};
use crate::prediction::{QualDirection, QualitativePrediction};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw consensus signal as the orchestrator reports it, before key-factor
/// extraction and validation.
#[derive(Debug, Clone)]
pub struct ConsensusSignal {
    pub direction: QualDirection,
    /// Consensus confidence in [0,1]
    pub confidence: Decimal,
    /// Narrative reasoning aggregated across providers
    pub reasoning: String,
    /// Cross-provider agreement in [0,1]
    pub provider_agreement: Decimal,
}

/// The multi-provider consensus round behind its network boundary.
///
/// A single call fans out to several language-model providers and aggregates
/// their answers; expect multi-second latency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsensusOrchestrator: Send + Sync {
    async fn generate_signal(
        &self,
        pair: &str,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> anyhow::Result<ConsensusSignal>;
}

/// Boundary wrapper producing a well-formed [`QualitativePrediction`] no
/// matter what the orchestrator does. The round-trip is bounded by a
/// timeout; expiry and every other failure fold to a neutral fallback.
pub struct QualitativeSignalSource {
    orchestrator: Arc<dyn ConsensusOrchestrator>,
    timeout_secs: u64,
}

impl QualitativeSignalSource {
    pub fn new(orchestrator: Arc<dyn ConsensusOrchestrator>, timeout_secs: u64) -> Self {
        Self {
            orchestrator,
            timeout_secs,
        }
    }

    /// Produce the qualitative prediction for a pair.
    pub async fn predict(
        &self,
        pair: &str,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> QualitativePrediction {
        let deadline = Duration::from_secs(self.timeout_secs);
        let outcome = tokio::time::timeout(
            deadline,
            self.orchestrator.generate_signal(pair, timeframe, candles),
        )
        .await;

        let signal = match outcome {
            Ok(Ok(signal)) => signal,
            Ok(Err(e)) => {
                let e = SignalError::from(e);
                warn!(pair, error = %e, "Consensus signal degraded to neutral");
                return QualitativePrediction::neutral_fallback(e.to_string());
            }
            Err(_) => {
                let e = SignalError::Timeout(self.timeout_secs);
                warn!(pair, error = %e, "Consensus signal degraded to neutral");
                return QualitativePrediction::neutral_fallback(e.to_string());
            }
        };

        let prediction = QualitativePrediction::from_consensus(
            signal.direction,
            signal.confidence.clamp(Decimal::ZERO, Decimal::ONE),
            signal.reasoning,
            signal.provider_agreement.clamp(Decimal::ZERO, Decimal::ONE),
        );

        debug!(
            pair,
            direction = %prediction.direction,
            confidence = %prediction.confidence,
            key_factors = prediction.key_factors.len(),
            "Consensus prediction"
        );

        prediction
    }
}
