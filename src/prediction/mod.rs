//! Prediction records produced by the two upstream signal sources.
//!
//! Both record types are immutable once produced and are embedded by value
//! into the fusion decision for audit.

mod qualitative;
mod quant;

pub use qualitative::{extract_key_factors, QualDirection, QualitativePrediction, MAX_KEY_FACTORS};
pub use quant::{QuantDirection, QuantPrediction};
