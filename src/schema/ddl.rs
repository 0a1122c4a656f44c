use log::info;

use super::{Association, ColumnType, ModelDescriptor, ModelRegistry};
use crate::database::Db;
use crate::error::AppError;

const TIMESTAMPS: [&str; 2] = [
    "`createdAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP",
    "`updatedAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?;
        match scheme {
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// Insert that silently skips rows colliding with a unique key.
    pub fn insert_ignore(self) -> &'static str {
        match self {
            Dialect::MySql => "INSERT IGNORE",
            Dialect::Sqlite => "INSERT OR IGNORE",
        }
    }

    fn column_type(self, column_type: ColumnType) -> &'static str {
        match (self, column_type) {
            (Dialect::MySql, ColumnType::String) => "VARCHAR(255)",
            (Dialect::MySql, ColumnType::Integer) => "BIGINT",
            (Dialect::Sqlite, ColumnType::String) => "TEXT",
            (Dialect::Sqlite, ColumnType::Integer) => "INTEGER",
        }
    }

    fn key_type(self) -> &'static str {
        self.column_type(ColumnType::Integer)
    }

    fn identity(self) -> &'static str {
        match self {
            Dialect::MySql => "`id` BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY",
            Dialect::Sqlite => "`id` INTEGER PRIMARY KEY AUTOINCREMENT",
        }
    }
}

pub fn create_table(model: &ModelDescriptor, dialect: Dialect) -> String {
    let mut lines = vec![dialect.identity().to_string()];
    for column in model.columns() {
        let null = if column.nullable { "NULL" } else { "NOT NULL" };
        lines.push(format!(
            "`{}` {} {}",
            column.name,
            dialect.column_type(column.column_type),
            null
        ));
    }
    if model.timestamps {
        lines.extend(TIMESTAMPS.iter().map(|c| c.to_string()));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS `{}` ({})",
        model.table_name,
        lines.join(", ")
    )
}

/// Join table for a many-to-many association. The pair of foreign keys is the
/// primary key, so a (source, target) pair is stored at most once.
pub fn create_join_table(association: &Association, dialect: Dialect) -> String {
    let key = dialect.key_type();
    format!(
        "CREATE TABLE IF NOT EXISTS `{through}` (\
         `{sk}` {key} NOT NULL, \
         `{tk}` {key} NOT NULL, \
         {created}, \
         {updated}, \
         PRIMARY KEY (`{sk}`, `{tk}`), \
         FOREIGN KEY (`{sk}`) REFERENCES `{st}` (`id`) ON DELETE CASCADE, \
         FOREIGN KEY (`{tk}`) REFERENCES `{tt}` (`id`) ON DELETE CASCADE)",
        through = association.through,
        sk = association.source_key,
        tk = association.target_key,
        st = association.source_table,
        tt = association.target_table,
        key = key,
        created = TIMESTAMPS[0],
        updated = TIMESTAMPS[1],
    )
}

/// Creates every model table and then every join table. Safe to rerun.
pub async fn sync(db: &Db, registry: &ModelRegistry) -> Result<(), AppError> {
    let dialect = db.dialect();
    let mut statements = Vec::new();
    for model in registry.models() {
        statements.push((model.table_name.as_str(), create_table(model, dialect)));
    }
    for association in registry.join_tables() {
        statements.push((association.through.as_str(), create_join_table(association, dialect)));
    }

    for (table, sql) in &statements {
        info!("Syncing table {}", table);
        on_pool!(db, pool => sqlx::query(sql).execute(pool).await.map(|_| ()))?;
    }
    Ok(())
}
