use super::{CurrencyPair, SeriesTable, TimeInterval};
use crate::domain::errors::AppError;

/// Cache key and request parameters for one series fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesQuery {
    pub pair: CurrencyPair,
    pub interval: TimeInterval,
    pub output_size: usize,
}

impl SeriesQuery {
    pub fn new(pair: CurrencyPair, interval: TimeInterval, output_size: usize) -> Self {
        Self { pair, interval, output_size }
    }
}

/// Source of candlestick series (HTTP client, cache wrapper, test fakes)
#[allow(async_fn_in_trait)]
pub trait SeriesSource {
    async fn fetch_series(&self, query: &SeriesQuery) -> Result<SeriesTable, AppError>;
}
