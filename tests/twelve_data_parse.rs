use bar_dashboard::config::DashboardConfig;
use bar_dashboard::domain::errors::{AppError, ConfigurationError, DomainError, InfrastructureError, NetworkError};
use bar_dashboard::domain::market_data::{CurrencyPair, PriceColumn, SeriesQuery, TimeInterval};
use bar_dashboard::infrastructure::http::TwelveDataClient;

const BODY: &str = r#"{
    "meta": {"symbol": "EUR/USD", "interval": "4h", "currency_base": "Euro"},
    "values": [
        {"datetime": "2024-01-02 04:00:00", "open": "1.09410", "high": "1.09500", "low": "1.09200", "close": "1.09300"},
        {"datetime": "2024-01-02 00:00:00", "open": "1.09380", "high": "1.09450", "low": "1.09310", "close": "1.09410"}
    ],
    "status": "ok"
}"#;

#[test]
fn parses_values_newest_first() {
    let table = TwelveDataClient::parse_time_series(BODY).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.latest_close().unwrap(), Some(1.093));
    assert_eq!(table.time_range().unwrap(), ("2024-01-02 04:00:00", "2024-01-02 00:00:00"));
    assert_eq!(table.column(PriceColumn::Open), vec![Some(1.0941), Some(1.0938)]);
}

#[test]
fn provider_error_body_is_an_api_error() {
    let body = r#"{"code": 401, "message": "**apikey** parameter is incorrect", "status": "error"}"#;
    let err = TwelveDataClient::parse_time_series(body).unwrap_err();
    match err {
        AppError::Infrastructure(InfrastructureError::Network(NetworkError::ApiError { code, message })) => {
            assert_eq!(code, Some(401));
            assert!(message.contains("apikey"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn empty_values_is_an_empty_series() {
    let err = TwelveDataClient::parse_time_series(r#"{"values": [], "status": "ok"}"#).unwrap_err();
    assert_eq!(err, AppError::Domain(DomainError::EmptySeries));
}

#[test]
fn missing_values_or_bad_json_is_malformed() {
    for body in [r#"{"status": "ok"}"#, "<html>busy</html>"] {
        let err = TwelveDataClient::parse_time_series(body).unwrap_err();
        assert!(matches!(
            err,
            AppError::Infrastructure(InfrastructureError::Network(NetworkError::MalformedPayload(_)))
        ));
    }
}

#[test]
fn url_uses_config_timezone_and_size() {
    let config = DashboardConfig {
        api_key: Some("k".to_string()),
        timezone: "UTC".to_string(),
        ..DashboardConfig::default()
    };
    let client = TwelveDataClient::from_config(&config);
    let url = client
        .series_url(&SeriesQuery::new(CurrencyPair::EurAud, TimeInterval::FortyFiveMinutes, 50))
        .unwrap();
    assert_eq!(
        url,
        "https://api.twelvedata.com/time_series?symbol=EUR%2FAUD&interval=45min&apikey=k&outputsize=50&timezone=UTC"
    );
}

#[test]
fn url_without_key_fails() {
    let config = DashboardConfig { api_key: None, ..DashboardConfig::default() };
    let err = TwelveDataClient::from_config(&config)
        .series_url(&SeriesQuery::new(CurrencyPair::EurUsd, TimeInterval::FourHours, 200))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::MissingConfiguration("DATA_API_KEY"));
}
