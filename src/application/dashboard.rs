use crate::domain::{
    alerts::{AlertStatus, AlertSubscription, AlertThresholds, EmailAddress, ThresholdCalculator},
    chart::{ChartBuilder, Figure, format_price},
    errors::AppError,
    logging::LogComponent,
    market_data::{CurrencyPair, SeriesQuery, SeriesTable, TimeInterval},
};
use crate::log_debug;

/// Everything the user has chosen on the page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub pair: CurrencyPair,
    pub interval: TimeInterval,
    pub upper_override: Option<f64>,
    pub lower_override: Option<f64>,
    pub email: String,
    pub alert_panel_open: bool,
    /// Bumped by Refresh so the page refetches the same query
    pub refresh_nonce: u32,
    pub subscription: Option<AlertSubscription>,
    pub subscription_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SelectPair(CurrencyPair),
    SelectInterval(TimeInterval),
    SetUpper(Option<f64>),
    SetLower(Option<f64>),
    SetEmail(String),
    ToggleAlertPanel,
    ResetThresholds,
    /// Carries the thresholds currently on screen
    Subscribe(AlertThresholds),
    Refresh,
}

/// Side effects the reducer asks the caller to perform
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEffect {
    /// Drop the cached series for the current selection
    InvalidateCache { pair: CurrencyPair, interval: TimeInterval },
    DeliverSubscription(AlertSubscription),
}

impl DashboardState {
    pub fn query(&self, output_size: usize) -> SeriesQuery {
        SeriesQuery::new(self.pair, self.interval, output_size)
    }

    pub fn apply(&mut self, event: DashboardEvent) -> Option<DashboardEffect> {
        log_debug!(LogComponent::Application("Dashboard"), "event {:?}", event);
        match event {
            DashboardEvent::SelectPair(pair) => {
                if self.pair != pair {
                    self.pair = pair;
                    self.clear_overrides();
                }
                None
            }
            DashboardEvent::SelectInterval(interval) => {
                if self.interval != interval {
                    self.interval = interval;
                    self.clear_overrides();
                }
                None
            }
            DashboardEvent::SetUpper(value) => {
                self.upper_override = value.filter(|v| v.is_finite());
                None
            }
            DashboardEvent::SetLower(value) => {
                self.lower_override = value.filter(|v| v.is_finite());
                None
            }
            DashboardEvent::SetEmail(email) => {
                self.email = email;
                self.subscription_error = None;
                None
            }
            DashboardEvent::ToggleAlertPanel => {
                self.alert_panel_open = !self.alert_panel_open;
                None
            }
            DashboardEvent::ResetThresholds => {
                self.clear_overrides();
                None
            }
            DashboardEvent::Subscribe(thresholds) => match EmailAddress::parse(&self.email) {
                Ok(email) => {
                    let subscription = AlertSubscription {
                        email,
                        pair: self.pair,
                        interval: self.interval,
                        thresholds,
                    };
                    self.subscription = Some(subscription.clone());
                    self.subscription_error = None;
                    Some(DashboardEffect::DeliverSubscription(subscription))
                }
                Err(e) => {
                    self.subscription = None;
                    self.subscription_error = Some(e.to_string());
                    None
                }
            },
            DashboardEvent::Refresh => {
                self.refresh_nonce = self.refresh_nonce.wrapping_add(1);
                Some(DashboardEffect::InvalidateCache { pair: self.pair, interval: self.interval })
            }
        }
    }

    fn clear_overrides(&mut self) {
        self.upper_override = None;
        self.lower_override = None;
    }
}

/// What the page shows for one loaded series
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub last_close: Option<f64>,
    /// Statistical thresholds, used to pre-fill the inputs
    pub defaults: AlertThresholds,
    /// Defaults with the user's overrides applied; these are drawn
    pub thresholds: AlertThresholds,
    pub figure: Figure,
    pub alert_status: AlertStatus,
    pub candle_count: usize,
}

/// Pure view-model build: title, thresholds and figure for `table`
pub fn build_view(
    state: &DashboardState,
    table: &SeriesTable,
    calculator: &ThresholdCalculator,
) -> Result<DashboardView, AppError> {
    let last_close = table.latest_close()?;
    let defaults = calculator.calculate(table)?;
    let thresholds = defaults.with_overrides(state.upper_override, state.lower_override);
    let figure = ChartBuilder::new(state.pair.symbol()).build(table, thresholds)?;

    let title = match last_close {
        Some(close) => format!("{} at {}", state.pair, format_price(close)),
        None => format!("{} at n/a", state.pair),
    };

    Ok(DashboardView {
        title,
        last_close,
        defaults,
        thresholds,
        figure,
        alert_status: AlertStatus::evaluate(last_close, &thresholds),
        candle_count: table.len(),
    })
}
