pub mod envelope;
pub mod handler;
pub mod projection;

pub use crate::domain::model::{NumberFormat, PhoneNumberRecord, RequestParams};
pub use crate::domain::ports::{ConfigProvider, PhoneNumberUtil};
pub use crate::utils::error::Result;
