use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::market_data::services::{mean, sample_std_dev};
use crate::domain::market_data::{PriceColumn, SeriesTable};
use serde::{Deserialize, Serialize};

/// Divisor applied to the open-price standard deviation for the lower line.
pub const DEFAULT_LOWER_BAND_DIVISOR: f64 = 7.0;

/// Value Object - the two horizontal alert levels.
///
/// No ordering is enforced: `lower` may end up above `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub upper: f64,
    pub lower: f64,
}

impl AlertThresholds {
    pub fn new(upper: f64, lower: f64) -> Self {
        Self { upper, lower }
    }

    /// Replace either level with user input when present
    pub fn with_overrides(self, upper: Option<f64>, lower: Option<f64>) -> Self {
        Self { upper: upper.unwrap_or(self.upper), lower: lower.unwrap_or(self.lower) }
    }
}

/// Derives default alert levels from the open-price series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCalculator {
    divisor: f64,
}

impl Default for ThresholdCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_BAND_DIVISOR)
    }
}

impl ThresholdCalculator {
    pub fn new(divisor: f64) -> Self {
        Self { divisor }
    }

    /// `upper = mean(open)`, `lower = upper - stddev(open) / divisor`.
    /// Missing opens are ignored.
    pub fn calculate(&self, table: &SeriesTable) -> DomainResult<AlertThresholds> {
        self.calculate_from_opens(&table.valid_values(PriceColumn::Open))
    }

    pub fn calculate_from_opens(&self, opens: &[f64]) -> DomainResult<AlertThresholds> {
        let upper = mean(opens)
            .ok_or(DomainError::NoValidPrices { column: PriceColumn::Open.name() })?;
        let lower = upper - sample_std_dev(opens) / self.divisor;
        Ok(AlertThresholds { upper, lower })
    }
}
