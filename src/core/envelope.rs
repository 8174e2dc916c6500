use crate::utils::error::{AppError, ErrorCategory};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiErrorKind {
    InvalidNumber,
    InvalidArgument,
    Internal,
}

impl ApiErrorKind {
    fn generic_message(self) -> &'static str {
        match self {
            ApiErrorKind::InvalidNumber => "The phone number could not be parsed",
            ApiErrorKind::InvalidArgument => "A request parameter has an unsupported value",
            ApiErrorKind::Internal => "An internal error occurred",
        }
    }
}

/// 回傳給客戶端的錯誤，不包含函式庫內部型別
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn from_app_error(err: &AppError, expose_message: bool) -> Self {
        let kind = match err {
            AppError::InvalidFormat { .. } => ApiErrorKind::InvalidArgument,
            _ if err.category() == ErrorCategory::InvalidInput => ApiErrorKind::InvalidNumber,
            _ => ApiErrorKind::Internal,
        };
        let message = if expose_message {
            err.to_string()
        } else {
            kind.generic_message().to_string()
        };
        Self { kind, message }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData<T> {
    Pending,
    Payload(T),
    Failure { error: ApiError },
}

impl<T> ResponseData<T> {
    fn is_pending(&self) -> bool {
        matches!(self, ResponseData::Pending)
    }
}

/// `{ success, data }` envelope shared by every API endpoint.
///
/// Starts pending (`success: true`, no data) and moves once to either a
/// payload or an error. A resolved envelope ignores further resolutions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "ResponseData::is_pending")]
    pub data: ResponseData<T>,
}

impl<T> ApiResponse<T> {
    pub fn pending() -> Self {
        Self {
            success: true,
            data: ResponseData::Pending,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.data.is_pending()
    }

    pub fn succeed(self, payload: T) -> Self {
        if self.is_resolved() {
            tracing::warn!("Ignoring payload for an already resolved response");
            return self;
        }
        Self {
            success: true,
            data: ResponseData::Payload(payload),
        }
    }

    pub fn fail(self, error: ApiError) -> Self {
        if self.is_resolved() {
            tracing::warn!("Ignoring error for an already resolved response");
            return self;
        }
        Self {
            success: false,
            data: ResponseData::Failure { error },
        }
    }

    pub fn resolve(self, result: std::result::Result<T, ApiError>) -> Self {
        match result {
            Ok(payload) => self.succeed(payload),
            Err(error) => self.fail(error),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.data {
            ResponseData::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.data {
            ResponseData::Failure { error } => Some(error),
            _ => None,
        }
    }
}
