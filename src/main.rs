use clap::Parser;
use itinerary_organizer::utils::logger;
use itinerary_organizer::{web, AppConfig, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting itinerary-organizer");

    // 載入並驗證配置
    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if !config.has_api_key() {
        // 伺服器照常啟動，頁面上會顯示設定錯誤
        tracing::warn!(
            "⚠️ {} is not set; the page will report the API key as not configured",
            config.llm.api_key_env
        );
    }

    web::serve(&config).await?;
    Ok(())
}
