use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("The string supplied did not seem to be a phone number")]
    NotANumber,

    #[error("Invalid country calling code (region: {region})")]
    InvalidCountryCode { region: String },

    #[error("Unsupported number format: {value}")]
    InvalidFormat { value: String },

    #[error("Phone number parsing failed: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入無法被電話號碼函式庫接受
    InvalidInput,
    /// 設定檔或命令列參數錯誤
    Configuration,
    /// 其他非預期錯誤
    Internal,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::NotANumber
            | AppError::InvalidCountryCode { .. }
            | AppError::InvalidFormat { .. }
            | AppError::ParseError { .. } => ErrorCategory::InvalidInput,
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::IoError(_)
            | AppError::ServerError { .. }
            | AppError::InternalError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::InvalidInput => format!("Input rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Internal => format!("Unexpected failure: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::NotANumber => "Provide a phone number in the 'number' query parameter",
            AppError::InvalidCountryCode { .. } => {
                "Use a two-letter region code such as 'US', or prefix the number with '+'"
            }
            AppError::InvalidFormat { .. } => {
                "Use one of: e164, international, national, rfc3966"
            }
            AppError::ParseError { .. } => "Check the number for typos and missing digits",
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            AppError::IoError(_) => "Check file permissions and that the path exists",
            AppError::ServerError { .. } => {
                "Make sure the bind address is free and allowed on this host"
            }
            AppError::InternalError { .. } => {
                "Retry the request; report the issue if it persists"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
