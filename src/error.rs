use thiserror::Error;

/// Failures raised while building or wiring entity descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Model already registered: {0}")]
    DuplicateModel(String),

    #[error("Referenced model not found: {0}")]
    ModelNotFound(String),

    #[error("Association already declared: {source_model} -> {target} through {through}")]
    DuplicateAssociation {
        source_model: String,
        target: String,
        through: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database did not report an id for the inserted {0} row")]
    MissingInsertId(&'static str),
}
