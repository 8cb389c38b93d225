use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SUPABASE_URL: &str = "https://project.supabase.co";
pub const DEFAULT_SUPABASE_KEY: &str = "sb_publishable_placeholder";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    fn set(&mut self, value: T, source: ConfigSource) {
        self.value = value;
        self.source = source;
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory for the session, local state copy and quote cache
    pub data_dir: ConfigValue<PathBuf>,
    pub supabase_url: ConfigValue<String>,
    /// Publishable (anon) key sent as `apikey`
    pub supabase_key: ConfigValue<String>,
    #[serde(skip_serializing)]
    pub gemini_api_key: ConfigValue<Option<String>>,
    pub gemini_model: ConfigValue<String>,
    /// Quiet period before remote writes
    pub debounce_ms: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    supabase: Option<SupabaseSection>,
    gemini: Option<GeminiSection>,
    sync: Option<SyncSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SupabaseSection {
    url: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GeminiSection {
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SyncSection {
    debounce_ms: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            data_dir: ConfigValue::new(Self::default_data_dir(), ConfigSource::Default),
            supabase_url: ConfigValue::new(DEFAULT_SUPABASE_URL.to_string(), ConfigSource::Default),
            supabase_key: ConfigValue::new(DEFAULT_SUPABASE_KEY.to_string(), ConfigSource::Default),
            gemini_api_key: ConfigValue::new(None, ConfigSource::Default),
            gemini_model: ConfigValue::new(DEFAULT_GEMINI_MODEL.to_string(), ConfigSource::Default),
            debounce_ms: ConfigValue::new(DEFAULT_DEBOUNCE_MS, ConfigSource::Default),
            config_file: None,
        };

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            if let Some(dir) = file.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                config.data_dir.set(resolved, ConfigSource::File);
            }
            let supabase = file.supabase.unwrap_or_default();
            let gemini = file.gemini.unwrap_or_default();
            let sync = file.sync.unwrap_or_default();

            if let Some(url) = non_empty(supabase.url) {
                config.supabase_url.set(url, ConfigSource::File);
            }
            if let Some(key) = non_empty(supabase.key) {
                config.supabase_key.set(key, ConfigSource::File);
            }
            if let Some(key) = non_empty(gemini.api_key) {
                config.gemini_api_key.set(Some(key), ConfigSource::File);
            }
            if let Some(model) = non_empty(gemini.model) {
                config.gemini_model.set(model, ConfigSource::File);
            }
            if let Some(ms) = sync.debounce_ms {
                config.debounce_ms.set(ms, ConfigSource::File);
            }
            config.config_file = Some(path);
        }

        if let Some(dir) = non_empty(env("ZENITH_DATA_DIR")) {
            config.data_dir.set(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(url) = non_empty(env("SUPABASE_URL")) {
            config.supabase_url.set(url, ConfigSource::Environment);
        }
        if let Some(key) = non_empty(env("SUPABASE_PUBLISHABLE_KEY")) {
            config.supabase_key.set(key, ConfigSource::Environment);
        }
        if let Some(key) = non_empty(env("GEMINI_API_KEY")).or_else(|| non_empty(env("API_KEY"))) {
            config.gemini_api_key.set(Some(key), ConfigSource::Environment);
        }

        Ok(config)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/zenith/
    /// - macOS: ~/Library/Application Support/zenith/
    /// - Windows: %APPDATA%/zenith/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zenith")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/zenith/
    /// - macOS: ~/Library/Application Support/zenith/
    /// - Windows: %APPDATA%/zenith/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zenith")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms.value)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
