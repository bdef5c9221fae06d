use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

/// Flat variable names accepted alongside the `SECTION__KEY` form.
const LEGACY_VARIABLES: [(&str, &str); 6] = [
    ("database.host", "DB_HOST"),
    ("database.port", "DB_PORT"),
    ("database.user", "DB_USER"),
    ("database.password", "DB_PASSWORD"),
    ("database.name", "DB_NAME"),
    ("jwt.secret", "JWT_SECRET"),
];

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat variables (DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, JWT_SECRET)
    /// 2. Environment variables (DATABASE__HOST, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// A `.env` file in the working directory is read into the environment first.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("database.port", 5432)?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8080)?
            .set_default("jwt.expiration_hours", 24)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__HOST=db overrides database.host
            .add_source(Environment::default().separator("__"));

        for (key, variable) in LEGACY_VARIABLES {
            builder = builder.set_override_option(key, env::var(variable).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("database.host", &self.database.host),
            ("database.user", &self.database.user),
            ("database.name", &self.database.name),
            ("jwt.secret", &self.jwt.secret),
        ];

        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Message(format!("{} must not be empty", key)));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Connection options assembled from the individual settings, so
    /// passwords with reserved URL characters need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}
