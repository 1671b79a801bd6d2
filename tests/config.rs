use bar_dashboard::config::DashboardConfig;
use bar_dashboard::domain::errors::ConfigurationError;

fn keyless() -> DashboardConfig {
    DashboardConfig { api_key: None, ..DashboardConfig::default() }
}

#[test]
fn defaults_are_valid() {
    let config = keyless();
    assert_eq!(config.api_base_url, "https://api.twelvedata.com");
    assert_eq!(config.output_size, 200);
    assert_eq!(config.timezone, "Africa/Lagos");
    assert_eq!(config.lower_band_divisor, 7.0);
    assert_eq!(config.page_title, "BAR.");
    assert!(config.validate().is_ok());
}

#[test]
fn partial_overrides_keep_other_fields() {
    let config = keyless()
        .with_overrides_json(r#"{"api_key": "abc", "output_size": 50, "debug_logging": true}"#)
        .unwrap();
    assert_eq!(config.require_api_key(), Ok("abc"));
    assert_eq!(config.output_size, 50);
    assert!(config.debug_logging);
    assert_eq!(config.timezone, "Africa/Lagos");
}

#[test]
fn blank_api_key_counts_as_missing() {
    let config = keyless().with_overrides_json(r#"{"api_key": "  "}"#).unwrap();
    assert_eq!(
        config.require_api_key(),
        Err(ConfigurationError::MissingConfiguration("DATA_API_KEY"))
    );
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{"output_size": 0}"#,
        r#"{"output_size": 5001}"#,
        r#"{"cache_ttl_ms": 0}"#,
        r#"{"lower_band_divisor": 0}"#,
        r#"{"lower_band_divisor": -7}"#,
        r#"{"api_base_url": ""}"#,
    ] {
        let result = keyless().with_overrides_json(json);
        assert!(
            matches!(result, Err(ConfigurationError::InvalidParameter(_))),
            "{} should be rejected",
            json
        );
    }
}

#[test]
fn misspelled_keys_are_rejected() {
    let err = keyless().with_overrides_json(r#"{"outputsize": 50}"#).unwrap_err();
    match err {
        ConfigurationError::InvalidParameter(message) => assert!(message.contains("outputsize")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn broken_json_is_a_configuration_error() {
    assert!(matches!(
        keyless().with_overrides_json("{output_size: 1"),
        Err(ConfigurationError::InvalidParameter(_))
    ));
}

#[test]
fn native_builds_have_no_page_block() {
    let config = DashboardConfig::from_page().unwrap();
    assert_eq!(config.output_size, DashboardConfig::default().output_size);
}

#[test]
fn full_document_deserializes_with_defaults() {
    let config: DashboardConfig = serde_json::from_str(r#"{"timezone": "UTC"}"#).unwrap();
    assert_eq!(config.timezone, "UTC");
    assert_eq!(config.cache_ttl_ms, 60_000);
}
