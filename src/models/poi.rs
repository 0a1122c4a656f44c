use crate::database::Db;
use crate::error::AppError;
use crate::schema::ModelDescriptor;

pub const MODEL: &str = "POI";

/// POI records are owned elsewhere; only the identity is declared here.
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new(MODEL)
}

/// Records an externally owned POI id so join rows can reference it.
/// Returns `false` when the id was already present.
pub async fn ensure(db: &Db, id: i64) -> Result<bool, AppError> {
    let sql = format!("{} INTO `POIs` (`id`) VALUES (?)", db.dialect().insert_ignore());
    let inserted = on_pool!(db, pool => {
        sqlx::query(&sql)
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected()
    });
    Ok(inserted > 0)
}
