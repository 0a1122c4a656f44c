use std::str::FromStr;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use log::info;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::AppError;
use crate::models;
use crate::schema::ddl::{self, Dialect};
use crate::schema::ModelRegistry;

/// Runs `$body` against whichever concrete pool `$db` holds. The body is
/// expanded once per driver, so it may use driver-specific result types
/// as long as both arms evaluate to the same type.
macro_rules! on_pool {
    ($db:expr, $pool:ident => $body:expr) => {
        match $db {
            $crate::database::Db::MySql($pool) => $body,
            $crate::database::Db::Sqlite($pool) => $body,
        }
    };
}

#[derive(Debug, Clone)]
pub enum Db {
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

impl Db {
    pub fn dialect(&self) -> Dialect {
        match self {
            Db::MySql(_) => Dialect::MySql,
            Db::Sqlite(_) => Dialect::Sqlite,
        }
    }

    pub async fn close(&self) {
        on_pool!(self, pool => pool.close().await)
    }
}

/// Timestamp written to `createdAt`/`updatedAt`. MySQL `DATETIME` keeps whole
/// seconds, so both backends store the same value.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

pub async fn connect(config: &Config) -> Result<Db, AppError> {
    let db = match config.dialect {
        Dialect::MySql => {
            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            Db::MySql(pool)
        }
        Dialect::Sqlite => {
            let options = SqliteConnectOptions::from_str(&config.database_url)?
                .create_if_missing(true)
                .foreign_keys(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                // An in-memory SQLite database lives only as long as its connection.
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            Db::Sqlite(pool)
        }
    };
    info!("Connected to {:?} database", config.dialect);
    Ok(db)
}

/// Connects, wires the model registry and creates any missing tables.
pub async fn bootstrap(config: &Config) -> Result<(Db, ModelRegistry), AppError> {
    let db = connect(config).await?;
    let registry = models::registry()?;
    ddl::sync(&db, &registry).await?;
    Ok((db, registry))
}
