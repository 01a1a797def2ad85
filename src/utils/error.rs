use thiserror::Error;

/// 錯誤分類，決定顯示給使用者的訊息與 HTTP 狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入錯誤，重新填寫表單即可
    Validation,
    /// 環境設定錯誤，需修正設定後重試
    Configuration,
    /// 網路或上游服務錯誤，可直接重試
    Upstream,
    /// 啟動階段的系統錯誤
    System,
}

#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Request error: {message}")]
    RequestError { message: String },

    #[error("Empty response: {message}")]
    EmptyResponseError { message: String },

    #[error("Invalid config value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OrganizerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::RequestError {
            message: message.into(),
        }
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::EmptyResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ConfigurationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::RequestError { .. } | Self::EmptyResponseError { .. } => ErrorCategory::Upstream,
            Self::ConfigParseError { .. } | Self::TemplateError { .. } | Self::IoError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 顯示在頁面上的訊息，不包含上游細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::ConfigurationError { .. } => "API key not configured.".to_string(),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Invalid configuration value for {}.", field)
            }
            Self::RequestError { .. } | Self::EmptyResponseError { .. } => {
                "Could not generate itinerary. Please try again.".to_string()
            }
            Self::ConfigParseError { .. } | Self::TemplateError { .. } | Self::IoError(_) => {
                "Something went wrong while starting the organizer.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Check the trip duration and itinerary details, then submit again.",
            Self::ConfigurationError { .. } => "Set GOOGLE_API_KEY in the environment and restart the server.",
            Self::InvalidConfigValueError { .. } => "Fix the reported value in the config file or CLI flags.",
            Self::RequestError { .. } => "Check network connectivity and submit again.",
            Self::EmptyResponseError { .. } => "Submit again, possibly with more detailed itinerary text.",
            Self::ConfigParseError { .. } => "Check the TOML syntax of the config file.",
            Self::TemplateError { .. } => "Check the page template for syntax errors.",
            Self::IoError(_) => "Check that the config file exists and is readable.",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 422,
            ErrorCategory::Upstream => 502,
            ErrorCategory::Configuration | ErrorCategory::System => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
