use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub classifiers: ClassifiersConfig,

    pub pagination: PaginationConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/lendr.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
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

    /// "*" allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSlotConfig {
    pub name: String,

    pub path: String,
}

impl ModelSlotConfig {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// The three classifier slots. Slot order is the verdict order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifiersConfig {
    pub model_a: ModelSlotConfig,

    pub model_b: ModelSlotConfig,

    pub model_c: ModelSlotConfig,
}

impl Default for ClassifiersConfig {
    fn default() -> Self {
        Self {
            model_a: ModelSlotConfig::new("random_forest", "models/random_forest.json"),
            model_b: ModelSlotConfig::new("gradient_boosting", "models/gradient_boosting.json"),
            model_c: ModelSlotConfig::new("xgboost", "models/xgboost.json"),
        }
    }
}

impl ClassifiersConfig {
    #[must_use]
    pub fn slots(&self) -> [&ModelSlotConfig; 3] {
        [&self.model_a, &self.model_b, &self.model_c]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: u64,

    /// Upper bound on `limit` for listing endpoints.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 19456,
            argon2_time_cost: 2,
            argon2_parallelism: 1,
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

impl Config {
    /// Loads the first config file found, or defaults, then applies
    /// environment overrides. Also returns the file that was read, so the
    /// caller can report it once logging is up.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();

        Self::load_first(&Self::config_paths(), |key| std::env::var(key).ok())
    }

    /// Reads the first existing path in `paths`, or defaults when none
    /// exists, then applies overrides from `lookup`.
    pub fn load_first(
        paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Option<PathBuf>)> {
        let source = paths.iter().find(|path| path.exists()).cloned();
        let mut config = match &source {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup)?;
        Ok((config, source))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies `LENDR_*` overrides. The lookup is injected so tests need not
    /// touch the process environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("LENDR_DATABASE_URL") {
            self.general.database_path = url;
        }
        if let Some(level) = lookup("LENDR_LOG_LEVEL") {
            self.general.log_level = level;
        }
        if let Some(host) = lookup("LENDR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LENDR_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid LENDR_PORT: {port}"))?;
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
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("lendr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".lendr").join("config.toml"));
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
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        let slots = self.classifiers.slots();
        for slot in slots {
            if slot.name.trim().is_empty() {
                anyhow::bail!("Classifier name cannot be empty");
            }
            if slot.path.trim().is_empty() {
                anyhow::bail!("Model path for '{}' cannot be empty", slot.name);
            }
        }
        if slots[0].name == slots[1].name
            || slots[0].name == slots[2].name
            || slots[1].name == slots[2].name
        {
            anyhow::bail!("Classifier names must be distinct");
        }

        let pagination = &self.pagination;
        if pagination.default_limit == 0 || pagination.default_limit > pagination.max_limit {
            anyhow::bail!(
                "pagination.default_limit must be between 1 and max_limit ({})",
                pagination.max_limit
            );
        }

        Ok(())
    }
}
