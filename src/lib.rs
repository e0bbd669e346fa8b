//! # Hybrid Signal Trader
//!
//! Fuses a quantitative ensemble-model prediction and a qualitative LLM
//! consensus into a single actionable trading decision with a position-size
//! recommendation.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `market`: Market data value types shared with collaborators (candles, features)
//! - `prediction`: Quantitative and qualitative prediction records
//! - `fusion`: Direction normalization, agreement scoring, strength
//!   classification, action mapping, and position sizing
//! - `signal`: Collaborator boundaries (ensemble predictor, consensus
//!   orchestrator) and the concurrent signal pipeline
//! - `error`: Boundary error taxonomy
//!
//! Exchange connectivity, model serving, LLM network calls, and order
//! placement live behind the traits in `signal` and are not part of this crate.

pub mod config;
pub mod error;
pub mod fusion;
pub mod market;
pub mod prediction;
pub mod signal;

pub use config::Config;
pub use fusion::{FusionDecision, FusionEngine, SignalStrength, TradeAction};
pub use signal::SignalPipeline;
