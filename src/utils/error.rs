use thiserror::Error;

/// Failure of a single call against the Sofia API.
///
/// Every endpoint reports through this one type. The message carried by
/// `Server` and `Transport` is already user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Transport { message: String },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: String,
        reason: String,
        fallback: String,
    },
}

impl ApiError {
    /// Message shown in the flow's alert region.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Server { message, .. } => message,
            ApiError::Transport { message } => message,
            ApiError::MalformedResponse { fallback, .. } => fallback,
        }
    }
}

#[derive(Error, Debug)]
pub enum SofiaError {
    #[error("{field} is required")]
    ValidationError { field: String },

    #[error("A {flow} request is already in flight")]
    SubmissionInFlight { flow: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Unknown target domain: {value}")]
    UnknownDomain { value: String },

    #[error("Tab '{tab}' is not available")]
    TabUnavailable { tab: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SofiaError {
    pub fn validation(field: &str) -> Self {
        SofiaError::ValidationError {
            field: field.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SofiaError::ValidationError { .. }
            | SofiaError::SubmissionInFlight { .. }
            | SofiaError::UnknownDomain { .. }
            | SofiaError::TabUnavailable { .. } => ErrorCategory::Input,
            SofiaError::Api(ApiError::MalformedResponse { .. }) => ErrorCategory::Data,
            SofiaError::Api(_) => ErrorCategory::Network,
            SofiaError::CsvError(_) | SofiaError::SerializationError(_) => ErrorCategory::Data,
            SofiaError::ConfigError { .. } | SofiaError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            SofiaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SofiaError::Api(api) => api.user_message().to_string(),
            SofiaError::ValidationError { field } => format!("Please fill in the {}", field),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the values you entered and submit again",
            ErrorCategory::Network => "Check that the Sofia API is reachable and try again",
            ErrorCategory::Data => "The API returned something unexpected; try again later",
            ErrorCategory::Configuration => {
                "Check --api-base-url, SOFIA_API_BASE_URL and the config file"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SofiaError>;
