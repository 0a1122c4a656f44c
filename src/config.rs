use std::env;

use crate::error::AppError;
use crate::schema::ddl::Dialect;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub dialect: Dialect,
}

impl Config {
    /// Reads `DATABASE_URL` and `DB_MAX_CONNECTIONS`, after loading `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?;
        let max_connections = env::var("DB_MAX_CONNECTIONS").ok();
        Self::from_parts(database_url, max_connections.as_deref())
    }

    pub fn from_parts(database_url: String, max_connections: Option<&str>) -> Result<Self, AppError> {
        let dialect = Dialect::from_url(&database_url).ok_or_else(|| {
            AppError::Config(format!("Unsupported database URL: {}", database_url))
        })?;
        let max_connections = match max_connections {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("DB_MAX_CONNECTIONS is not a number: {}", raw))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        // Every extra connection to an in-memory database opens a new, empty one.
        let max_connections = if is_in_memory(&database_url) {
            1
        } else {
            max_connections
        };

        Ok(Config {
            database_url,
            max_connections,
            dialect,
        })
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite:")
        && (database_url.contains(":memory:") || database_url.contains("mode=memory"))
}
