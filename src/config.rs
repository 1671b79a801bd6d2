use crate::domain::alerts::DEFAULT_LOWER_BAND_DIVISOR;
use crate::domain::errors::ConfigurationError;
use serde::Deserialize;

/// DOM id of the optional `<script type="application/json">` override block
pub const CONFIG_ELEMENT_ID: &str = "bar-config";

const MAX_OUTPUT_SIZE: usize = 5000;

/// Runtime settings for the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub output_size: usize,
    pub timezone: String,
    pub cache_ttl_ms: u64,
    pub lower_band_divisor: f64,
    pub page_title: String,
    pub debug_logging: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.twelvedata.com".to_string(),
            api_key: option_env!("DATA_API_KEY").map(str::to_string),
            output_size: 200,
            timezone: "Africa/Lagos".to_string(),
            cache_ttl_ms: 60_000,
            lower_band_divisor: DEFAULT_LOWER_BAND_DIVISOR,
            page_title: "BAR.".to_string(),
            debug_logging: false,
        }
    }
}

/// Partial override document; absent keys keep the current value, unknown
/// keys are rejected
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    api_base_url: Option<String>,
    api_key: Option<String>,
    output_size: Option<usize>,
    timezone: Option<String>,
    cache_ttl_ms: Option<u64>,
    lower_band_divisor: Option<f64>,
    page_title: Option<String>,
    debug_logging: Option<bool>,
}

impl DashboardConfig {
    /// Defaults merged with the `#bar-config` block, when the page has one
    pub fn from_page() -> Result<Self, ConfigurationError> {
        match read_config_element() {
            Some(json) => Self::default().with_overrides_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides_json(mut self, json: &str) -> Result<Self, ConfigurationError> {
        let overrides: ConfigOverrides = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidParameter(format!("config JSON: {}", e)))?;

        if let Some(v) = overrides.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = overrides.api_key {
            self.api_key = Some(v).filter(|key| !key.trim().is_empty());
        }
        if let Some(v) = overrides.output_size {
            self.output_size = v;
        }
        if let Some(v) = overrides.timezone {
            self.timezone = v;
        }
        if let Some(v) = overrides.cache_ttl_ms {
            self.cache_ttl_ms = v;
        }
        if let Some(v) = overrides.lower_band_divisor {
            self.lower_band_divisor = v;
        }
        if let Some(v) = overrides.page_title {
            self.page_title = v;
        }
        if let Some(v) = overrides.debug_logging {
            self.debug_logging = v;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigurationError::InvalidParameter("api_base_url is empty".to_string()));
        }
        if self.output_size == 0 || self.output_size > MAX_OUTPUT_SIZE {
            return Err(ConfigurationError::InvalidParameter(format!(
                "output_size must be within 1..={}, got {}",
                MAX_OUTPUT_SIZE, self.output_size
            )));
        }
        if self.cache_ttl_ms == 0 {
            return Err(ConfigurationError::InvalidParameter(
                "cache_ttl_ms must be positive".to_string(),
            ));
        }
        if !self.lower_band_divisor.is_finite() || self.lower_band_divisor <= 0.0 {
            return Err(ConfigurationError::InvalidParameter(format!(
                "lower_band_divisor must be a positive number, got {}",
                self.lower_band_divisor
            )));
        }
        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigurationError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigurationError::MissingConfiguration("DATA_API_KEY"))
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_element() -> Option<String> {
    gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_element() -> Option<String> {
    None
}
