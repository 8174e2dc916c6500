use crate::domain::model::{NumberFormat, PhoneNumberRecord};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use std::time::Duration;

/// 電話號碼函式庫的抽象介面，由啟動程式建立後注入 HTTP 狀態
pub trait PhoneNumberUtil: Send + Sync {
    fn parse(&self, number: Option<&str>, region: Option<&str>) -> Result<PhoneNumberRecord>;

    fn parse_and_keep_raw_input(
        &self,
        number: Option<&str>,
        region: Option<&str>,
    ) -> Result<PhoneNumberRecord>;

    fn format(&self, record: &PhoneNumberRecord, style: NumberFormat) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn log_format(&self) -> LogFormat;
    fn log_level(&self) -> Option<&str>;
    fn expose_error_messages(&self) -> bool;
    fn shutdown_timeout(&self) -> Duration;
}
