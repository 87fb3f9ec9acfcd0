use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tahfeez_core::Language;
use tracing::warn;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_API_VERSION: &str = "v1";
const CONFIG_DIR: &str = ".tahfeez";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(ClientError::Config(format!("unknown storage backend: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    /// Serve data operations from the live API instead of the mock source.
    pub use_api: bool,
    /// Resolve logins against the fixed demo credential table.
    pub mock_auth: bool,
    pub language: Language,
    pub timeout_secs: u64,
    /// Declared for a generic retry layer; only the 401 refresh-retry exists.
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub mock_delay_ms: u64,
    pub storage: StorageBackend,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_api: false,
            mock_auth: true,
            language: Language::En,
            timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            mock_delay_ms: 500,
            storage: StorageBackend::File,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// `<base_url>/<api_version>` without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{version}")
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must start with http:// or https://: {base}"
            )));
        }
        Ok(())
    }
}

pub fn config_dir() -> Result<PathBuf, ClientError> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| ClientError::Config("HOME is not set".to_string()))?;
    Ok(Path::new(&home).join(CONFIG_DIR))
}

pub fn config_path() -> Result<PathBuf, ClientError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Reads the config file (defaults when missing) and applies env overrides.
pub fn load_config() -> Result<ClientConfig, ClientError> {
    let mut config = read_config_file(&config_path()?)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn read_config_file(path: &Path) -> Result<ClientConfig, ClientError> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|err| ClientError::Config(format!("failed to read {}: {err}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|err| ClientError::Config(format!("failed to parse {}: {err}", path.display())))
}

pub fn save_config(config: &ClientConfig) -> Result<(), ClientError> {
    write_config_file(&config_path()?, config)
}

pub fn write_config_file(path: &Path, config: &ClientConfig) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| ClientError::Config(format!("failed to create {}: {err}", parent.display())))?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)
        .map_err(|err| ClientError::Config(format!("failed to write {}: {err}", path.display())))
}

pub fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(value) = env::var("TAHFEEZ_API_URL") {
        config.base_url = value;
    }
    if let Ok(value) = env::var("TAHFEEZ_API_VERSION") {
        config.api_version = value;
    }
    if let Ok(value) = env::var("TAHFEEZ_USE_API") {
        match parse_bool(&value) {
            Some(enabled) => config.use_api = enabled,
            None => warn!(event = "config_invalid", field = "TAHFEEZ_USE_API", value = %value),
        }
    }
    if let Ok(value) = env::var("TAHFEEZ_MOCK_AUTH") {
        match parse_bool(&value) {
            Some(enabled) => config.mock_auth = enabled,
            None => warn!(event = "config_invalid", field = "TAHFEEZ_MOCK_AUTH", value = %value),
        }
    }
    if let Ok(value) = env::var("TAHFEEZ_LANGUAGE") {
        match value.parse::<Language>() {
            Ok(language) => config.language = language,
            Err(_) => warn!(event = "config_invalid", field = "TAHFEEZ_LANGUAGE", value = %value),
        }
    }
    if let Ok(value) = env::var("TAHFEEZ_TIMEOUT_SECS") {
        match value.parse::<u64>() {
            Ok(secs) => config.timeout_secs = secs,
            Err(_) => warn!(event = "config_invalid", field = "TAHFEEZ_TIMEOUT_SECS", value = %value),
        }
    }
    if let Ok(value) = env::var("TAHFEEZ_MOCK_DELAY_MS") {
        match value.parse::<u64>() {
            Ok(ms) => config.mock_delay_ms = ms,
            Err(_) => warn!(event = "config_invalid", field = "TAHFEEZ_MOCK_DELAY_MS", value = %value),
        }
    }
    if let Ok(value) = env::var("TAHFEEZ_STORAGE") {
        match value.parse::<StorageBackend>() {
            Ok(backend) => config.storage = backend,
            Err(_) => warn!(event = "config_invalid", field = "TAHFEEZ_STORAGE", value = %value),
        }
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Runtime switches read on every data-source call.
#[derive(Debug)]
pub struct Preferences {
    use_api: AtomicBool,
    language: RwLock<Language>,
}

impl Preferences {
    pub fn new(use_api: bool, language: Language) -> Self {
        Self {
            use_api: AtomicBool::new(use_api),
            language: RwLock::new(language),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.use_api, config.language)
    }

    pub fn use_api(&self) -> bool {
        self.use_api.load(Ordering::Acquire)
    }

    pub fn set_use_api(&self, enabled: bool) {
        self.use_api.store(enabled, Ordering::Release);
    }

    pub fn language(&self) -> Language {
        match self.language.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_language(&self, language: Language) {
        match self.language.write() {
            Ok(mut guard) => *guard = language,
            Err(poisoned) => *poisoned.into_inner() = language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_joins_version() {
        let config = ClientConfig {
            base_url: "https://api.example.com/api/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.api_root(), "https://api.example.com/api/v1");

        let bare = ClientConfig {
            api_version: String::new(),
            ..config
        };
        assert_eq!(bare.api_root(), "https://api.example.com/api");
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn config_file_roundtrip_fills_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        assert!(!read_config_file(&path)?.use_api);

        fs::write(&path, r#"{"use_api": true, "language": "ar"}"#)?;
        let config = read_config_file(&path)?;
        assert!(config.use_api);
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);

        write_config_file(&path, &config)?;
        assert!(read_config_file(&path)?.use_api);
        Ok(())
    }

    #[test]
    fn validate_rejects_bare_host() {
        let config = ClientConfig {
            base_url: "api.example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn preferences_switch_at_runtime() {
        let preferences = Preferences::new(false, Language::En);
        preferences.set_use_api(true);
        preferences.set_language(Language::Ar);
        assert!(preferences.use_api());
        assert_eq!(preferences.language(), Language::Ar);
    }
}
