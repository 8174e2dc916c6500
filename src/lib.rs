pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::LibPhoneNumberUtil;
pub use crate::app::{router, serve};
pub use crate::config::{CliConfig, ServerConfig};
pub use crate::core::envelope::{ApiError, ApiErrorKind, ApiResponse};
pub use crate::core::handler::ApiHandler;
pub use crate::utils::error::{AppError, Result};
