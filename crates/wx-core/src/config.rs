//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. wx-chat.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: None,
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

/// Weather endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Port the endpoint server listens on
    #[serde(default = "default_weather_port")]
    pub port: u16,

    /// Base URL the get_weather tool targets
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            port: default_weather_port(),
            endpoint_url: default_endpoint_url(),
        }
    }
}

fn default_weather_port() -> u16 {
    8000
}

fn default_endpoint_url() -> String {
    "http://localhost:8000".to_string()
}

/// Main configuration for wx-chat
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Weather endpoint configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl Config {
    /// 設定ファイルから環境変数を展開する
    ///
    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // '{' を消費

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // '}' を消費
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let toml_config: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let mut config = Self::from_toml_config(toml_config);

        // 既存の環境変数で上書き（環境変数が優先）
        config.apply_env_overrides();

        Ok(config)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// カレントディレクトリの `wx-chat.toml` を探し、
    /// 見つからない場合は環境変数のみから構築します。
    pub fn load() -> crate::Result<Self> {
        if Path::new("wx-chat.toml").exists() {
            return Self::from_toml_file("wx-chat.toml");
        }

        Ok(Self::from_env())
    }

    /// TOML 構造から Config を構築
    fn from_toml_config(toml: TomlConfig) -> Self {
        let llm = toml.llm.unwrap_or_default();
        let llm_config = LlmConfig {
            api_key: llm.api_key.unwrap_or_default(),
            model: llm.model.unwrap_or_else(default_model),
            base_url: llm.base_url,
        };

        let weather = toml.weather.unwrap_or_default();
        let weather_config = WeatherConfig {
            port: weather.port.unwrap_or_else(default_weather_port),
            endpoint_url: weather.endpoint_url.unwrap_or_else(default_endpoint_url),
        };

        Config {
            llm: llm_config,
            weather: weather_config,
        }
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            self.llm.api_key = api_key;
        } else if let Ok(api_key) = std::env::var("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }

        if let Ok(model) = std::env::var("LLM_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }

        if let Ok(base_url) = std::env::var("LLM_BASE_URL") {
            if !base_url.is_empty() {
                self.llm.base_url = Some(base_url);
            }
        }

        if let Ok(port) = std::env::var("WEATHER_PORT") {
            if let Ok(p) = port.parse() {
                self.weather.port = p;
            }
        }

        if let Ok(url) = std::env::var("WEATHER_ENDPOINT_URL") {
            if !url.is_empty() {
                self.weather.endpoint_url = url;
            }
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Ensure an API key is present (required for chat mode)
    pub fn require_api_key(&self) -> crate::Result<()> {
        if self.llm.api_key.is_empty() {
            return Err(Error::Config(
                "ANTHROPIC_API_KEY or LLM_API_KEY not set".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

/// TOML ファイル用のトップレベル構造
#[derive(Debug, Deserialize)]
struct TomlConfig {
    /// LLM 設定
    llm: Option<TomlLlmConfig>,
    /// 天気エンドポイント設定
    weather: Option<TomlWeatherConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLlmConfig {
    /// モデル名
    #[serde(default)]
    model: Option<String>,
    /// API キー
    #[serde(default)]
    api_key: Option<String>,
    /// ベース URL (オプション)
    #[serde(default)]
    base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlWeatherConfig {
    /// ポート番号
    #[serde(default)]
    port: Option<u16>,
    /// エンドポイント URL
    #[serde(default)]
    endpoint_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_weather_config_default() {
        let config = WeatherConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.endpoint_url, "http://localhost:8000");
    }

    #[test]
    fn test_expand_env_vars() {
        // テスト用環境変数を設定
        unsafe {
            std::env::set_var("WX_CHAT_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${WX_CHAT_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        // 存在しない環境変数
        let result = Config::expand_env_vars("prefix_${NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("WX_CHAT_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        let result = Config::expand_env_vars("no_vars_here");
        assert_eq!(result, "no_vars_here");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[llm]
model = "claude-sonnet-4-20250514"
api_key = "test_key"
base_url = "https://api.example.com"

[weather]
port = 9000
endpoint_url = "http://weather.local:9000"
"#;

        let toml_config: TomlConfig = toml::from_str(toml_content).unwrap();

        let llm = toml_config.llm.unwrap();
        assert_eq!(llm.api_key, Some("test_key".to_string()));
        assert_eq!(llm.base_url, Some("https://api.example.com".to_string()));

        let weather = toml_config.weather.unwrap();
        assert_eq!(weather.port, Some(9000));
        assert_eq!(
            weather.endpoint_url,
            Some("http://weather.local:9000".to_string())
        );
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[llm]
api_key = "file_key"

[weather]
port = 9100
"#
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.weather.port, 9100);
        assert_eq!(config.llm.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_require_api_key() {
        let config = Config::default();
        assert!(config.require_api_key().is_err());

        let config = Config {
            llm: LlmConfig {
                api_key: "key".to_string(),
                ..LlmConfig::default()
            },
            ..Config::default()
        };
        assert!(config.require_api_key().is_ok());
    }
}
