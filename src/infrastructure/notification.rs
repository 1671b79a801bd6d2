use crate::domain::alerts::{AlertNotifier, AlertSubscription};
use crate::domain::errors::AppError;
use crate::domain::logging::{LogComponent, LogLevel, get_logger};

/// Records subscriptions in the log. There is no delivery backend.
#[derive(Debug, Clone, Default)]
pub struct LoggingAlertNotifier;

impl AlertNotifier for LoggingAlertNotifier {
    fn deliver(&self, subscription: &AlertSubscription) -> Result<(), AppError> {
        let metadata = serde_json::to_string(subscription).unwrap_or_default();
        get_logger().log_with_metadata(
            LogLevel::Info,
            LogComponent::Infrastructure("AlertNotifier"),
            &format!(
                "📬 {} subscribed to {} ({}) alerts",
                subscription.email, subscription.pair, subscription.interval
            ),
            &metadata,
        );
        Ok(())
    }
}
