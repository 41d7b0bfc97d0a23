//! Engine configuration.
//!
//! The significance thresholds are the only tunable parameters of the
//! derivation itself; the strict flag opts into rejecting malformed rows.

use crate::error::{Error, Result};
use psyche_calc::tables::flow::{DEFAULT_DRAIN_THRESHOLD, DEFAULT_TRANSFER_THRESHOLD};
use psyche_calc::SignificanceThresholds;
use serde::{Deserialize, Serialize};

/// Engine settings (`[engine]` section).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drain total above which a drive is flagged
    pub drain_threshold: f64,
    /// Transfer total above which a drive is flagged
    pub transfer_threshold: f64,
    /// Reject rows with malformed answers instead of coercing them
    pub strict_answers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drain_threshold: DEFAULT_DRAIN_THRESHOLD,
            transfer_threshold: DEFAULT_TRANSFER_THRESHOLD,
            strict_answers: false,
        }
    }
}

impl EngineConfig {
    /// Thresholds for flag evaluation.
    #[must_use]
    pub fn thresholds(&self) -> SignificanceThresholds {
        SignificanceThresholds {
            drain: self.drain_threshold,
            transfer: self.transfer_threshold,
        }
    }

    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("engine.drain_threshold", self.drain_threshold),
            ("engine.transfer_threshold", self.transfer_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Configuration(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
