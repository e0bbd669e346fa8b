//! Market data value types shared with the upstream collaborators.
//!
//! The fusion engine itself never fetches market data; these types are the
//! vocabulary of the collaborator contracts in `signal` (feature provider,
//! ensemble predictor, consensus orchestrator).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single OHLCV row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Candle timeframe for collaborator requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Exchange-style interval string (e.g., "1h").
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-width numeric feature matrix produced by a feature provider.
///
/// One row per candle, most recent row last. Rows containing non-finite
/// values are treated as unusable by the ensemble boundary.
#[derive(Debug, Clone, Default)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with every value finite (no NaN/inf gaps).
    pub fn clean_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.iter().all(|v| v.is_finite()))
            .count()
    }
}
