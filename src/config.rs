use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database type (postgres, sqlite)
    #[serde(default = "default_db_type", rename = "type")]
    pub db_type: String,
    /// Database host
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Database name
    #[serde(default = "default_db_name", rename = "database")]
    pub name: String,
    /// Database user
    #[serde(default = "default_db_user", rename = "username")]
    pub user: String,
    /// Database password
    #[serde(default)]
    pub password: String,
    /// SQLite file path (":memory:" for an in-memory database)
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_db_type() -> String {
    "postgres".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "moim".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_path() -> String {
    "./data/moim.db".to_string()
}

fn default_max_connections() -> u32 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log: LogConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: default_db_type(),
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: String::new(),
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory SQLite settings, used by tests
    pub fn sqlite_memory() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            path: ":memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.db_type.eq_ignore_ascii_case("sqlite")
    }

    /// Generate database connection URL
    pub fn connection_url(&self) -> String {
        if self.is_sqlite() {
            if self.path == ":memory:" {
                return "sqlite::memory:".to_string();
            }
            return format!("sqlite://{}?mode=rwc", self.path);
        }
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        if !config.database.is_sqlite() && config.database.db_type != "postgres" {
            anyhow::bail!("unsupported database type: {}", config.database.db_type);
        }

        Ok(config)
    }
}
