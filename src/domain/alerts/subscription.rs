use super::AlertThresholds;
use crate::domain::errors::{AppError, DomainError, DomainResult};
use crate::domain::market_data::{CurrencyPair, TimeInterval};
use derive_more::Display;
use serde::Serialize;

const ALLOWED_DOMAIN: &str = "gmail.com";

/// Value Object - a subscriber address accepted by the alert panel (gmail only)
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEmail("address is empty".to_string()));
        }

        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::InvalidEmail(format!("'{}' is not an address", trimmed)));
        };

        if local.is_empty() || local.contains(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(format!("'{}' has no valid mailbox", trimmed)));
        }
        if !domain.eq_ignore_ascii_case(ALLOWED_DOMAIN) {
            return Err(DomainError::InvalidEmail(format!(
                "only {} addresses are supported",
                ALLOWED_DOMAIN
            )));
        }

        Ok(Self(format!("{}@{}", local, ALLOWED_DOMAIN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Entity - a request to be told when price leaves the threshold band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSubscription {
    pub email: EmailAddress,
    pub pair: CurrencyPair,
    pub interval: TimeInterval,
    pub thresholds: AlertThresholds,
}

/// Where the latest close sits relative to the alert lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AlertStatus {
    #[display(fmt = "above upper")]
    AboveUpper,
    #[display(fmt = "below lower")]
    BelowLower,
    #[display(fmt = "within band")]
    WithinBand,
    #[display(fmt = "no price")]
    Unknown,
}

impl AlertStatus {
    /// Upper is checked first, so an inverted band reports `AboveUpper`.
    pub fn evaluate(latest_close: Option<f64>, thresholds: &AlertThresholds) -> Self {
        match latest_close {
            None => Self::Unknown,
            Some(close) if close > thresholds.upper => Self::AboveUpper,
            Some(close) if close < thresholds.lower => Self::BelowLower,
            Some(_) => Self::WithinBand,
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::AboveUpper | Self::BelowLower)
    }
}

/// Delivery seam for alert subscriptions
pub trait AlertNotifier {
    fn deliver(&self, subscription: &AlertSubscription) -> Result<(), AppError>;
}
