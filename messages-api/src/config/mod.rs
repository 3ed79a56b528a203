use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Mounted in front of every route, e.g. `/api`. Empty means the root.
    pub path_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. When set it wins over the individual fields below.
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub table: String,
    pub max_connections: u32,
    pub create_table: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Plain database variables used by existing deployments, mapped onto config keys.
const DATABASE_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_USERNAME", "database.username"),
    ("DB_PASSWORD", "database.password"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_DATABASE", "database.name"),
    ("DATABASE_URL", "database.url"),
];

impl Config {
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(config_file, None)
    }

    /// Loads configuration, reading variables from `vars` instead of the process
    /// environment when it is given.
    pub fn load_from(
        config_file: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = ConfigBuilder::builder()
            // Set defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.path_prefix", "")?
            .set_default("database.table", "test")?
            .set_default("database.max_connections", 10)?
            .set_default("database.create_table", true)?
            .set_default("logging.level", "info")?;

        let settings = match config_file {
            Some(path) => settings.add_source(File::from(path)),
            None => {
                // Try to load from messages.toml in current directory
                let settings = if let Ok(current_dir) = env::current_dir() {
                    let config_path = current_dir.join("messages.toml");
                    settings.add_source(File::from(config_path).required(false))
                } else {
                    settings
                };

                // Try to load from ~/.config/messages/messages.toml
                if let Ok(home_dir) = env::var("HOME") {
                    let config_path = format!("{}/.config/messages/messages.toml", home_dir);
                    settings.add_source(File::with_name(&config_path).required(false))
                } else {
                    settings
                }
            }
        };

        // Override with environment variables (MESSAGES_SERVER__PORT and friends)
        let settings = settings.add_source(
            Environment::with_prefix("MESSAGES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        );

        let lookup = |key: &str| match &vars {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        };

        let mut settings = settings;
        for (var, key) in DATABASE_ENV_OVERRIDES {
            settings = settings.set_override_option(*key, lookup(var))?;
        }

        let config: Config = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_sql_identifier(&self.database.table) {
            return Err(ConfigError::Message(format!(
                "database.table must be a plain SQL identifier, got '{}'",
                self.database.table
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Returns the URL to connect with, assembling a MySQL URL from the individual
    /// fields when no explicit URL is configured.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.to_string());
        }

        let (Some(username), Some(host), Some(name)) = (
            self.username.as_deref(),
            self.host.as_deref(),
            self.name.as_deref(),
        ) else {
            return Err(ConfigError::Message(
                "set DATABASE_URL, or DB_USERNAME, DB_HOST and DB_DATABASE".to_string(),
            ));
        };

        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(username),
            urlencoding::encode(self.password.as_deref().unwrap_or_default()),
            host,
            self.port.unwrap_or(3306),
            name
        ))
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
