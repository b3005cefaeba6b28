use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned non-success status: {status}")]
    UpstreamStatus { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Payload contained no work records")]
    EmptyPayload,

    #[error("Invalid work record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("No data found: {reason}")]
    NoData { reason: String },

    #[error("No data to chart: total hours must be greater than zero")]
    NoChartData,

    #[error("Rendering error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Rendering,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) | ReportError::UpstreamStatus { .. } => ErrorCategory::Network,
            ReportError::SerializationError(_)
            | ReportError::EmptyPayload
            | ReportError::InvalidRecord { .. }
            | ReportError::NoData { .. }
            | ReportError::NoChartData => ErrorCategory::Data,
            ReportError::RenderError { .. } => ErrorCategory::Rendering,
            ReportError::IoError(_) => ErrorCategory::Io,
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒資料就提早結束，不算失敗
            ReportError::NoData { .. } | ReportError::NoChartData => ErrorSeverity::Low,
            ReportError::ApiError(_) | ReportError::UpstreamStatus { .. } => ErrorSeverity::Medium,
            ReportError::SerializationError(_)
            | ReportError::EmptyPayload
            | ReportError::InvalidRecord { .. }
            | ReportError::RenderError { .. }
            | ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorSeverity::High,
            ReportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ApiError(e) if e.is_timeout() => {
                "The time-entry API did not answer in time".to_string()
            }
            ReportError::ApiError(_) => "Could not reach the time-entry API".to_string(),
            ReportError::UpstreamStatus { status } => {
                format!("The time-entry API call failed with status {}", status)
            }
            ReportError::SerializationError(_) => {
                "The work-log payload is not valid JSON for this report".to_string()
            }
            ReportError::EmptyPayload => "The work-log payload was empty".to_string(),
            ReportError::InvalidRecord { index, reason } => {
                format!("Work record #{} is invalid: {}", index, reason)
            }
            ReportError::NoData { .. } => "No data found. Bailing out.".to_string(),
            ReportError::NoChartData => {
                "Nothing to chart: every record reports zero hours".to_string()
            }
            ReportError::RenderError { message } => {
                format!("Could not render the report: {}", message)
            }
            ReportError::IoError(e) => format!("Could not write the report file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the endpoint and API key, or use --on-failure fallback to chart sample data"
            }
            ErrorCategory::Data => "Check that the payload is a JSON array of {name, hours} objects with positive hours",
            ErrorCategory::Rendering => "Re-run with --verbose to see the rendering details",
            ErrorCategory::Io => "Make sure the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the reported setting in the CLI flags or TOML file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
