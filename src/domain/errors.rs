use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Domain(DomainError),
    Infrastructure(InfrastructureError),
    Configuration(ConfigurationError),
}

/// Violations of the series / alert rules
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Upstream returned zero rows; nothing can be charted.
    EmptySeries,
    /// Every cell of the column was missing after normalization.
    NoValidPrices { column: &'static str },
    InvalidEmail(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InfrastructureError {
    Network(NetworkError),
    Rendering(RenderingError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    HttpRequestFailed(String),
    HttpStatus { status: u16, status_text: String },
    /// Error body reported by the market-data provider itself
    ApiError { code: Option<u16>, message: String },
    MalformedPayload(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderingError {
    CanvasAccessFailed(String),
    DrawFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    MissingConfiguration(&'static str),
    InvalidParameter(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Domain(e) => write!(f, "Domain Error: {}", e),
            AppError::Infrastructure(e) => write!(f, "Infrastructure Error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration Error: {}", e),
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::EmptySeries => write!(f, "market data response contained no rows"),
            DomainError::NoValidPrices { column } => {
                write!(f, "column '{}' has no numeric values", column)
            }
            DomainError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
        }
    }
}

impl Display for InfrastructureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InfrastructureError::Network(e) => write!(f, "Network: {}", e),
            InfrastructureError::Rendering(e) => write!(f, "Rendering: {}", e),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NetworkError::HttpRequestFailed(msg) => write!(f, "request failed: {}", msg),
            NetworkError::HttpStatus { status, status_text } => {
                write!(f, "HTTP error: {} - {}", status, status_text)
            }
            NetworkError::ApiError { code: Some(code), message } => {
                write!(f, "API error {}: {}", code, message)
            }
            NetworkError::ApiError { code: None, message } => write!(f, "API error: {}", message),
            NetworkError::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

impl Display for RenderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RenderingError::CanvasAccessFailed(msg) => write!(f, "canvas unavailable: {}", msg),
            RenderingError::DrawFailed(msg) => write!(f, "draw failed: {}", msg),
        }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigurationError::MissingConfiguration(key) => write!(f, "missing {}", key),
            ConfigurationError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for DomainError {}
impl std::error::Error for InfrastructureError {}
impl std::error::Error for ConfigurationError {}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::Domain(error)
    }
}

impl From<InfrastructureError> for AppError {
    fn from(error: InfrastructureError) -> Self {
        AppError::Infrastructure(error)
    }
}

impl From<NetworkError> for AppError {
    fn from(error: NetworkError) -> Self {
        AppError::Infrastructure(InfrastructureError::Network(error))
    }
}

impl From<RenderingError> for AppError {
    fn from(error: RenderingError) -> Self {
        AppError::Infrastructure(InfrastructureError::Rendering(error))
    }
}

impl From<ConfigurationError> for AppError {
    fn from(error: ConfigurationError) -> Self {
        AppError::Configuration(error)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
