pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "phone-explorer")]
#[command(about = "JSON endpoints for parsing and formatting phone numbers")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Listen address (default: 127.0.0.1:3000)")]
    pub bind: Option<String>,

    #[arg(long, value_enum, help = "Log output format")]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 最終生效的設定：TOML 檔為基礎，命令列參數覆蓋
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub log_format: LogFormat,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub expose_error_messages: bool,
    pub shutdown_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file.validate()?;
        Ok(Self::merge(cli, &file))
    }

    pub fn merge(cli: &CliConfig, file: &TomlConfig) -> Self {
        Self {
            bind: cli
                .bind
                .clone()
                .unwrap_or_else(|| file.bind_addr().to_string()),
            log_format: cli
                .log_format
                .or(file.logging.format)
                .unwrap_or_default(),
            log_level: file.logging.level.clone(),
            verbose: cli.verbose,
            expose_error_messages: file.expose_error_messages(),
            shutdown_timeout_seconds: file.shutdown_timeout_seconds(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::merge(
            &CliConfig {
                config: None,
                bind: None,
                log_format: None,
                verbose: false,
            },
            &TomlConfig::default(),
        )
    }
}

impl ConfigProvider for ServerConfig {
    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }

    fn log_level(&self) -> Option<&str> {
        // --verbose 優先於檔案中的 level
        if self.verbose {
            None
        } else {
            self.log_level.as_deref()
        }
    }

    fn expose_error_messages(&self) -> bool {
        self.expose_error_messages
    }

    fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_socket_addr("bind", &self.bind)?;
        validate_positive_number("shutdown_timeout_seconds", self.shutdown_timeout_seconds, 1)?;
        Ok(())
    }
}
