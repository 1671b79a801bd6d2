use super::dashboard::{DashboardEffect, DashboardState, DashboardView, build_view};
use crate::config::DashboardConfig;
use crate::domain::{
    alerts::{AlertNotifier, AlertSubscription, ThresholdCalculator},
    errors::AppError,
    logging::LogComponent,
    market_data::{CurrencyPair, SeriesQuery, SeriesSource, SeriesTable, TimeInterval},
};
use crate::infrastructure::{
    cache::CachedSeriesSource, http::TwelveDataClient, notification::LoggingAlertNotifier,
};
use crate::{log_debug, log_error, log_info};
use std::rc::Rc;

/// A fetch outcome tagged with the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    pub query: SeriesQuery,
    pub table: Result<Rc<SeriesTable>, AppError>,
}

/// Application service behind the page: cached fetch, view build, alerts
pub struct DashboardService<S> {
    source: CachedSeriesSource<S>,
    calculator: ThresholdCalculator,
    notifier: Box<dyn AlertNotifier>,
    output_size: usize,
}

impl DashboardService<TwelveDataClient> {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            TwelveDataClient::from_config(config),
            config,
            Box::new(LoggingAlertNotifier),
        )
    }
}

impl<S: SeriesSource> DashboardService<S> {
    pub fn new(source: S, config: &DashboardConfig, notifier: Box<dyn AlertNotifier>) -> Self {
        Self {
            source: CachedSeriesSource::new(source, config.cache_ttl_ms),
            calculator: ThresholdCalculator::new(config.lower_band_divisor),
            notifier,
            output_size: config.output_size,
        }
    }

    pub fn query(&self, state: &DashboardState) -> SeriesQuery {
        state.query(self.output_size)
    }

    /// Fetch (or reuse) the series for `query`
    pub async fn fetch(&self, query: &SeriesQuery) -> Result<Rc<SeriesTable>, AppError> {
        self.source.fetch(query).await.inspect_err(|e| {
            log_error!(
                LogComponent::Application("DashboardService"),
                "❌ Failed to load {} @ {}: {}",
                query.pair,
                query.interval,
                e
            );
        })
    }

    pub async fn fetch_tagged(&self, query: SeriesQuery) -> FetchedSeries {
        let table = self.fetch(&query).await;
        FetchedSeries { query, table }
    }

    /// View of `fetched`, or `None` while it belongs to an earlier selection.
    /// A stale table must not be titled, drawn or subscribed to under the
    /// newly selected pair.
    pub fn view(
        &self,
        state: &DashboardState,
        fetched: &FetchedSeries,
    ) -> Option<Result<DashboardView, AppError>> {
        if fetched.query != self.query(state) {
            log_debug!(
                LogComponent::Application("DashboardService"),
                "waiting for {} @ {}, have {} @ {}",
                state.pair,
                state.interval,
                fetched.query.pair,
                fetched.query.interval
            );
            return None;
        }
        Some(
            fetched
                .table
                .as_ref()
                .map_err(|e| e.clone())
                .and_then(|table| build_view(state, table, &self.calculator)),
        )
    }

    pub async fn load(&self, state: &DashboardState) -> Result<DashboardView, AppError> {
        let table = self.fetch(&self.query(state)).await?;
        build_view(state, &table, &self.calculator)
    }

    pub fn invalidate(&self, pair: CurrencyPair, interval: TimeInterval) {
        self.source.invalidate(&SeriesQuery::new(pair, interval, self.output_size));
    }

    pub fn deliver(&self, subscription: &AlertSubscription) -> Result<(), AppError> {
        self.notifier.deliver(subscription)?;
        log_info!(
            LogComponent::Application("DashboardService"),
            "🔔 Alert subscription stored for {}",
            subscription.email
        );
        Ok(())
    }

    /// Carry out an effect returned by [`DashboardState::apply`]
    pub fn perform(&self, effect: DashboardEffect) -> Result<(), AppError> {
        match effect {
            DashboardEffect::InvalidateCache { pair, interval } => {
                self.invalidate(pair, interval);
                Ok(())
            }
            DashboardEffect::DeliverSubscription(subscription) => self.deliver(&subscription),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.source.cached_entries()
    }
}
