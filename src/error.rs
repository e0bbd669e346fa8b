//! Error taxonomy for the collaborator boundaries.
//!
//! These errors never cross the signal-source wrappers: every variant is
//! converted into a neutral, zero-confidence prediction at the boundary
//! (see `signal`), so the fusion engine itself has no error branch.

use thiserror::Error;

/// Failures that can occur while producing an upstream prediction.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Not enough clean historical rows to run the ensemble.
    #[error("insufficient feature data: {rows} clean rows, need at least {min_rows}")]
    InsufficientData { rows: usize, min_rows: usize },

    /// Collaborator returned output that violates its contract.
    #[error("malformed collaborator output: {0}")]
    Malformed(String),

    /// Consensus call exceeded its deadline.
    #[error("consensus request timed out after {0}s")]
    Timeout(u64),

    /// Any other upstream failure (network, model runtime, provider error).
    #[error("upstream failure: {0}")]
    Upstream(#[from] anyhow::Error),
}
