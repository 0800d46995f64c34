use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub trends: TrendsConfig,

    pub providers: ProvidersConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:database/trends.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Signs the session cookie that carries flash notices.
    pub secret_key: String,

    /// Whether to set the Secure flag on session cookies.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            secret_key: "dev-secret-key-change-in-production".to_string(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    /// Freshness window, in days, applied when reading stored trends.
    pub default_search_days: u32,

    /// How many of the ranked general trends are persisted by a form search.
    pub max_results_per_platform: usize,

    pub ranking_limit: u64,

    pub api_default_limit: u64,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            default_search_days: 3,
            max_results_per_platform: 50,
            ranking_limit: 100,
            api_default_limit: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Country code sent to the search-trends service.
    pub country: String,

    pub language: String,

    /// Timezone offset in minutes, as the trends service expects it.
    pub timezone_offset: i32,

    /// Maximum number of trending terms taken from the search-trends service.
    pub trending_limit: usize,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,

    /// Fixed seed for simulated values. Unset means OS entropy.
    pub seed: Option<u64>,

    // Social platform credentials. The social providers serve simulated data
    // until their official APIs are wired in.
    pub facebook_access_token: Option<String>,

    pub instagram_access_token: Option<String>,

    pub tiktok_api_key: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            country: "BR".to_string(),
            language: "pt-BR".to_string(),
            timezone_offset: 180,
            trending_limit: 20,
            request_timeout_seconds: 30,
            seed: None,
            facebook_access_token: None,
            instagram_access_token: None,
            tiktok_api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            trends: TrendsConfig::default(),
            providers: ProvidersConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and process
    /// environment overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies the environment variables understood by the application.
    /// `lookup` is injected so tests don't have to mutate the process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("SECRET_KEY") {
            self.server.secret_key = secret;
        }

        if let Some(token) = lookup("FACEBOOK_ACCESS_TOKEN") {
            self.providers.facebook_access_token = Some(token);
        }

        if let Some(token) = lookup("INSTAGRAM_ACCESS_TOKEN") {
            self.providers.instagram_access_token = Some(token);
        }

        if let Some(key) = lookup("TIKTOK_API_KEY") {
            self.providers.tiktok_api_key = Some(key);
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_path = normalize_database_url(&url);
        }

        if let Some(days) = lookup("DEFAULT_SEARCH_DAYS") {
            self.trends.default_search_days = days
                .trim()
                .parse()
                .with_context(|| format!("Invalid DEFAULT_SEARCH_DAYS: {days}"))?;
        }

        if let Some(max) = lookup("MAX_RESULTS_PER_PLATFORM") {
            self.trends.max_results_per_platform = max
                .trim()
                .parse()
                .with_context(|| format!("Invalid MAX_RESULTS_PER_PLATFORM: {max}"))?;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("trendboard").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".trendboard").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.secret_key.trim().is_empty() {
            anyhow::bail!("Secret key cannot be empty");
        }

        if self.trends.default_search_days == 0 {
            anyhow::bail!("Search window must be at least one day");
        }

        if self.trends.max_results_per_platform == 0 {
            anyhow::bail!("Max results per platform must be > 0");
        }

        if self.providers.country.is_empty() {
            anyhow::bail!("Provider country code cannot be empty");
        }

        Ok(())
    }
}

/// Accepts both the `sqlite:///relative/path` URL form and the `sqlite:path`
/// form used by the store; bare paths get the scheme prepended.
#[must_use]
pub fn normalize_database_url(url: &str) -> String {
    let url = url.trim();
    if let Some(path) = url.strip_prefix("sqlite:///") {
        format!("sqlite:{path}")
    } else if url.starts_with("sqlite:") {
        url.to_string()
    } else {
        format!("sqlite:{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trends.default_search_days, 3);
        assert_eq!(config.trends.max_results_per_platform, 50);
        assert_eq!(config.providers.country, "BR");
        assert_eq!(config.general.database_path, "sqlite:database/trends.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[trends]"));
        assert!(toml_str.contains("[providers]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [trends]
            default_search_days = 7
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.trends.default_search_days, 7);

        assert_eq!(config.trends.max_results_per_platform, 50);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("DATABASE_URL", "sqlite:///database/other.db"),
            ("DEFAULT_SEARCH_DAYS", "5"),
            ("MAX_RESULTS_PER_PLATFORM", "10"),
            ("TIKTOK_API_KEY", "tk"),
        ]);

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(config.general.database_path, "sqlite:database/other.db");
        assert_eq!(config.trends.default_search_days, 5);
        assert_eq!(config.trends.max_results_per_platform, 10);
        assert_eq!(config.providers.tiktok_api_key.as_deref(), Some("tk"));
        assert!(config.providers.facebook_access_token.is_none());
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let vars = env(&[("DEFAULT_SEARCH_DAYS", "three")]);
        let mut config = Config::default();
        assert!(
            config
                .apply_env_overrides(|key| vars.get(key).cloned())
                .is_err()
        );
    }

    #[test]
    fn test_validate_secret() {
        let vars = env(&[("SECRET_KEY", "3f9a1c0e7b2d4a6f8e1c3b5d7f9a0c2e")]);
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| vars.get(key).cloned())
            .unwrap();
        assert!(config.validate().is_ok());

        assert!(Config::default().validate().is_ok());

        config.server.secret_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_database_url() {
        assert_eq!(normalize_database_url("sqlite:///a/b.db"), "sqlite:a/b.db");
        assert_eq!(normalize_database_url("sqlite:a.db"), "sqlite:a.db");
        assert_eq!(normalize_database_url("trends.db"), "sqlite:trends.db");
        assert_eq!(
            normalize_database_url("sqlite::memory:"),
            "sqlite::memory:"
        );
    }
}
