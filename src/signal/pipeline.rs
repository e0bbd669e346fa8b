//! Concurrent signal pipeline: produce both predictions, then fuse.

use crate::config::Config;
use crate::fusion::{FusionDecision, FusionEngine};
use crate::market::{Candle, Timeframe};
use crate::signal::consensus::{ConsensusOrchestrator, QualitativeSignalSource};
use crate::signal::ensemble::{EnsemblePredictor, FeatureProvider, QuantSignalSource};
use std::sync::Arc;
use tracing::instrument;

/// End-to-end evaluation of one trading pair.
///
/// Collaborators are injected once at construction; the pipeline holds no
/// other state, so concurrent evaluations for different pairs are fully
/// independent.
pub struct SignalPipeline {
    quant: QuantSignalSource,
    qualitative: QualitativeSignalSource,
    engine: FusionEngine,
}

impl SignalPipeline {
    pub fn new(
        config: Config,
        features: Arc<dyn FeatureProvider>,
        predictor: Arc<dyn EnsemblePredictor>,
        orchestrator: Arc<dyn ConsensusOrchestrator>,
    ) -> Self {
        Self {
            quant: QuantSignalSource::new(features, predictor, config.pipeline.clone()),
            qualitative: QualitativeSignalSource::new(
                orchestrator,
                config.pipeline.consensus_timeout_secs,
            ),
            engine: FusionEngine::new(config.fusion),
        }
    }

    /// Evaluate a pair: run the local ensemble prediction and the
    /// network-bound consensus round concurrently, join, and fuse.
    ///
    /// Never fails: a degraded upstream side arrives at the engine as a
    /// neutral zero-confidence prediction and surfaces as a Wait decision.
    #[instrument(skip(self, candles), fields(candles = candles.len()))]
    pub async fn evaluate(
        &self,
        pair: &str,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> FusionDecision {
        let (quant, qualitative) = tokio::join!(
            async { self.quant.predict(pair, candles) },
            self.qualitative.predict(pair, timeframe, candles),
        );

        self.engine.fuse(pair, quant, qualitative)
    }
}
