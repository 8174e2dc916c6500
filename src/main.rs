use clap::Parser;
use phone_explorer::core::ConfigProvider;
use phone_explorer::utils::error::ErrorCategory;
use phone_explorer::utils::{logger, validation::Validate};
use phone_explorer::{AppError, CliConfig, LibPhoneNumberUtil, ServerConfig};
use std::sync::Arc;

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ phone-explorer failed: {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::InvalidInput | ErrorCategory::Configuration => 1,
        ErrorCategory::Internal => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定錯誤時 logger 尚未初始化，先用預設格式
    let config = match ServerConfig::from_cli(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(cli.log_format.unwrap_or_default(), cli.verbose, None);
            exit_with(&e);
        }
    };

    logger::init_logger(config.log_format(), config.verbose, config.log_level());

    tracing::info!("Starting phone-explorer");
    tracing::debug!("Server config: {:?}", config);

    let util = Arc::new(LibPhoneNumberUtil::new());
    if let Err(e) = phone_explorer::serve(&config, util).await {
        exit_with(&e);
    }

    tracing::info!("✅ phone-explorer stopped");
    Ok(())
}
