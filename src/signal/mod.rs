//! Collaborator boundaries and the concurrent signal pipeline.
//!
//! The traits here are the only seams to the outside world: feature
//! engineering, the ensemble model, and the LLM consensus orchestrator all
//! live behind them. Each boundary wrapper converts every failure into a
//! neutral zero-confidence prediction so the fusion engine always sees
//! well-formed inputs.

mod consensus;
mod ensemble;
mod pipeline;

pub use consensus::{ConsensusOrchestrator, ConsensusSignal, QualitativeSignalSource};
pub use ensemble::{EnsembleOutput, EnsemblePredictor, FeatureProvider, QuantSignalSource};
pub use pipeline::SignalPipeline;
