pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::{LlmConfig, ServerConfig, TomlConfig};

#[derive(Debug, Clone, Serialize, Deserialize, Parser, Default)]
#[command(name = "itinerary-organizer")]
#[command(about = "Turn raw trip notes into a day-by-day itinerary")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind the web server to")]
    pub host: Option<String>,

    #[arg(long, help = "Port to bind the web server to")]
    pub port: Option<u16>,

    #[arg(long, help = "LLM model identifier")]
    pub model: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// 執行時設定：預設值 < 設定檔 < CLI 參數，API key 來自環境變數
#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    api_key: Option<String>,
}

impl AppConfig {
    pub fn new(server: ServerConfig, llm: LlmConfig, api_key: Option<String>) -> Self {
        Self {
            server,
            llm,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let api_key = std::env::var(&file_config.llm.api_key_env).ok();
        Self::from_parts(file_config, cli, api_key)
    }

    /// 合併設定檔與 CLI 參數後驗證
    pub fn from_parts(file_config: TomlConfig, cli: &CliConfig, api_key: Option<String>) -> Result<Self> {
        let mut merged = file_config;
        if let Some(host) = &cli.host {
            merged.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            merged.server.port = port;
        }
        if let Some(model) = &cli.model {
            merged.llm.model = model.clone();
        }
        merged.validate()?;

        Ok(Self::new(merged.server, merged.llm, api_key))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("llm", &self.llm)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn base_url(&self) -> &str {
        &self.llm.base_url
    }

    fn model(&self) -> &str {
        &self.llm.model
    }

    fn temperature(&self) -> f32 {
        self.llm.temperature
    }

    fn max_output_tokens(&self) -> u32 {
        self.llm.max_output_tokens
    }

    fn timeout_seconds(&self) -> u64 {
        self.llm.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_values() {
        let file_config = TomlConfig::from_toml_str("[server]\nport = 9000\n[llm]\nmodel = \"gemini-pro\"\n").unwrap();
        let cli = CliConfig {
            port: Some(7000),
            model: Some("gemini-1.5-flash".to_string()),
            ..CliConfig::default()
        };

        let config = AppConfig::from_parts(file_config, &cli, Some("test-key".to_string())).unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.model(), "gemini-1.5-flash");
        assert_eq!(config.api_key(), Some("test-key"));
        assert_eq!(config.bind_address(), "127.0.0.1:7000");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = AppConfig::from_parts(TomlConfig::default(), &CliConfig::default(), Some("  ".to_string())).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_invalid_cli_model_fails_validation() {
        let cli = CliConfig {
            model: Some(" ".to_string()),
            ..CliConfig::default()
        };
        assert!(AppConfig::from_parts(TomlConfig::default(), &cli, None).is_err());
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = AppConfig::from_parts(TomlConfig::default(), &CliConfig::default(), Some("secret-key".to_string())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = CliConfig::parse_from(["itinerary-organizer", "--port", "8080", "--verbose"]);
        assert_eq!(cli.port, Some(8080));
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }
}
