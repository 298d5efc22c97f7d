use anyhow::Context;
use clap::Parser;
use practitioner_registry::config::{open_repository, LogFormat};
use practitioner_registry::utils::error::ErrorSeverity;
use practitioner_registry::utils::{logger, validation::Validate};
use practitioner_registry::{CliConfig, CommandDispatcher, PractitionerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置（日誌格式取決於配置，所以先載入）
    let config = match cli.load_registry_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let level = config.logging.level.as_deref();
    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, level),
        LogFormat::Json => logger::init_json_logger(cli.verbose, level),
    }

    tracing::info!("Starting practitioner-registry");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let repository = open_repository(&config)
        .await
        .context("failed to open the practitioner store")?;
    let service = PractitionerService::with_pagination(repository, config.pagination());
    let dispatcher = CommandDispatcher::new(service);

    let result = match cli.command.into_command() {
        Ok(command) => dispatcher.dispatch(command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            let rendered =
                serde_json::to_string_pretty(&outcome).context("failed to render the result")?;
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
