//! Configuration management for the hybrid signal trader.
//!
//! Loads settings from environment variables and config files.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Signal fusion thresholds
    #[serde(default)]
    pub fusion: FusionConfig,
    /// Upstream signal pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Entry-gating floors consulted by the fusion engine.
///
/// The strength-tier thresholds themselves are part of the classification
/// contract and are not configurable; these floors gate trade entry on top
/// of the tier the rule chain assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Quant confidence below this classifies the pair as Weak (0.0-1.0)
    #[serde(default = "default_min_quant_confidence")]
    pub min_quant_confidence: Decimal,
    /// Qualitative confidence below this classifies the pair as Weak (0.0-1.0)
    #[serde(default = "default_min_qual_confidence")]
    pub min_qual_confidence: Decimal,
    /// Minimum agreement score required to act on an entry-grade signal (0.0-1.0)
    #[serde(default = "default_min_agreement_score")]
    pub min_agreement_score: Decimal,
}

/// Settings for the two upstream signal sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Deadline for the multi-provider consensus round-trip in seconds
    #[serde(default = "default_consensus_timeout_secs")]
    pub consensus_timeout_secs: u64,
    /// Minimum clean feature rows the ensemble requires
    #[serde(default = "default_min_feature_rows")]
    pub min_feature_rows: usize,
    /// Divisor mapping |predicted return %| to a confidence in [0,1]
    /// when the ensemble supplies no confidence of its own
    #[serde(default = "default_return_confidence_scale")]
    pub return_confidence_scale: Decimal,
}

// Default value functions
fn default_min_quant_confidence() -> Decimal {
    Decimal::new(60, 2) // 0.60
}

fn default_min_qual_confidence() -> Decimal {
    Decimal::new(60, 2) // 0.60
}

fn default_min_agreement_score() -> Decimal {
    Decimal::new(50, 2) // 0.50 - at least directionally aligned
}

fn default_consensus_timeout_secs() -> u64 {
    45 // multi-provider LLM round-trip has multi-second latency
}

fn default_min_feature_rows() -> usize {
    24
}

fn default_return_confidence_scale() -> Decimal {
    Decimal::new(5, 0) // a 5% predicted move saturates confidence at 1.0
}

impl Config {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().separator("__").prefix("HST"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_quant_confidence", self.fusion.min_quant_confidence),
            ("min_qual_confidence", self.fusion.min_qual_confidence),
            ("min_agreement_score", self.fusion.min_agreement_score),
        ] {
            anyhow::ensure!(
                value >= Decimal::ZERO && value <= Decimal::ONE,
                "{name} must be between 0 and 1"
            );
        }

        anyhow::ensure!(
            self.pipeline.consensus_timeout_secs > 0,
            "consensus_timeout_secs must be positive"
        );

        anyhow::ensure!(
            self.pipeline.min_feature_rows > 0,
            "min_feature_rows must be positive"
        );

        anyhow::ensure!(
            self.pipeline.return_confidence_scale > Decimal::ZERO,
            "return_confidence_scale must be positive"
        );

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            min_quant_confidence: default_min_quant_confidence(),
            min_qual_confidence: default_min_qual_confidence(),
            min_agreement_score: default_min_agreement_score(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            consensus_timeout_secs: default_consensus_timeout_secs(),
            min_feature_rows: default_min_feature_rows(),
            return_confidence_scale: default_return_confidence_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_floor_is_rejected() {
        let mut config = Config::default();
        config.fusion.min_quant_confidence = dec!(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.pipeline.consensus_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
