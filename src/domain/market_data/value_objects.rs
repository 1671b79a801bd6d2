use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Value Object - currency pair offered in the pair selector
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum CurrencyPair {
    #[default]
    #[strum(serialize = "EUR/USD")]
    #[serde(rename = "EUR/USD")]
    EurUsd,

    #[strum(serialize = "GBP/JPY")]
    #[serde(rename = "GBP/JPY")]
    GbpJpy,

    #[strum(serialize = "EUR/AUD")]
    #[serde(rename = "EUR/AUD")]
    EurAud,
}

impl CurrencyPair {
    /// Symbol as the provider expects it, e.g. `EUR/USD`
    pub fn symbol(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<CurrencyPair> {
        Self::iter().collect()
    }
}

/// Value Object - bar granularity, serialized with the provider's spelling
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum TimeInterval {
    #[strum(serialize = "1min")]
    #[serde(rename = "1min")]
    OneMinute,

    #[strum(serialize = "5min")]
    #[serde(rename = "5min")]
    FiveMinutes,

    #[strum(serialize = "15min")]
    #[serde(rename = "15min")]
    FifteenMinutes,

    #[strum(serialize = "30min")]
    #[serde(rename = "30min")]
    ThirtyMinutes,

    #[strum(serialize = "45min")]
    #[serde(rename = "45min")]
    FortyFiveMinutes,

    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,

    #[strum(serialize = "2h")]
    #[serde(rename = "2h")]
    TwoHours,

    #[default]
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,

    #[strum(serialize = "1day")]
    #[serde(rename = "1day")]
    OneDay,

    #[strum(serialize = "1week")]
    #[serde(rename = "1week")]
    OneWeek,

    #[strum(serialize = "1month")]
    #[serde(rename = "1month")]
    OneMonth,
}

impl TimeInterval {
    pub fn to_api_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<TimeInterval> {
        Self::iter().collect()
    }

    pub fn duration_ms(&self) -> u64 {
        const MINUTE: u64 = 60 * 1000;
        match self {
            Self::OneMinute => MINUTE,
            Self::FiveMinutes => 5 * MINUTE,
            Self::FifteenMinutes => 15 * MINUTE,
            Self::ThirtyMinutes => 30 * MINUTE,
            Self::FortyFiveMinutes => 45 * MINUTE,
            Self::OneHour => 60 * MINUTE,
            Self::TwoHours => 2 * 60 * MINUTE,
            Self::FourHours => 4 * 60 * MINUTE,
            Self::OneDay => 24 * 60 * MINUTE,
            Self::OneWeek => 7 * 24 * 60 * MINUTE,
            Self::OneMonth => 30 * 24 * 60 * MINUTE, // approximate
        }
    }
}

/// Numeric columns of a series row
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum PriceColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl PriceColumn {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn interval_strings_match_provider() {
        let names: Vec<String> = TimeInterval::all().iter().map(|i| i.to_string()).collect();
        assert_eq!(
            names,
            [
                "1min", "5min", "15min", "30min", "45min", "1h", "2h", "4h", "1day", "1week",
                "1month"
            ]
        );
        assert_eq!(TimeInterval::default(), TimeInterval::FourHours);
        assert_eq!(TimeInterval::from_str("1day").unwrap(), TimeInterval::OneDay);
    }

    #[test]
    fn pair_round_trips_through_select_value() {
        for pair in CurrencyPair::all() {
            assert_eq!(CurrencyPair::from_str(pair.symbol()).unwrap(), pair);
        }
        assert_eq!(CurrencyPair::all().len(), 3);
        assert!(CurrencyPair::from_str("BTC/USD").is_err());
    }
}
