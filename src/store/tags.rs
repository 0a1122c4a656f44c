use log::{debug, info};

use crate::database::{self, Db};
use crate::error::AppError;
use crate::models::tag::{NewTag, Tag, TagChanges};

const SELECT_TAG: &str = "SELECT `id`, `name`, `image`, `color`, `group`, `creatorId`, \
     `createdAt`, `updatedAt` FROM `Tags`";

const INSERT_TAG: &str = "INSERT INTO `Tags` \
     (`name`, `image`, `color`, `group`, `creatorId`, `createdAt`, `updatedAt`) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

/// One column assignment in an UPDATE.
enum Value {
    Text(Option<String>),
    Integer(Option<i64>),
}

pub async fn create(db: &Db, new_tag: &NewTag) -> Result<Tag, AppError> {
    let now = database::now();
    macro_rules! insert {
        () => {
            sqlx::query(INSERT_TAG)
                .bind(new_tag.name.clone())
                .bind(new_tag.image.clone())
                .bind(new_tag.color.clone())
                .bind(new_tag.group)
                .bind(new_tag.creator_id.clone())
                .bind(now)
                .bind(now)
        };
    }

    let id = match db {
        Db::MySql(pool) => {
            let result = insert!().execute(pool).await?;
            i64::try_from(result.last_insert_id()).ok().filter(|id| *id > 0)
        }
        Db::Sqlite(pool) => Some(insert!().execute(pool).await?.last_insert_rowid()),
    }
    .ok_or(AppError::MissingInsertId("Tags"))?;
    info!("Created tag {}", id);

    Ok(Tag {
        id,
        name: new_tag.name.clone(),
        image: new_tag.image.clone(),
        color: new_tag.color.clone(),
        group: new_tag.group,
        creator_id: new_tag.creator_id.clone(),
        created_at: now,
        updated_at: now,
    })
}

pub async fn find(db: &Db, id: i64) -> Result<Option<Tag>, AppError> {
    let sql = format!("{} WHERE `id` = ?", SELECT_TAG);
    let tag = on_pool!(db, pool => {
        sqlx::query_as::<_, Tag>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
    });
    Ok(tag)
}

pub async fn list(db: &Db) -> Result<Vec<Tag>, AppError> {
    let sql = format!("{} ORDER BY `id`", SELECT_TAG);
    let tags = on_pool!(db, pool => {
        sqlx::query_as::<_, Tag>(&sql).fetch_all(pool).await?
    });
    Ok(tags)
}

/// Returns the updated row, or `None` when no tag has this id.
pub async fn update(db: &Db, id: i64, changes: &TagChanges) -> Result<Option<Tag>, AppError> {
    if changes.is_empty() {
        return find(db, id).await;
    }

    let mut assignments: Vec<(&str, Value)> = Vec::new();
    if let Some(name) = &changes.name {
        assignments.push(("name", Value::Text(name.clone())));
    }
    if let Some(image) = &changes.image {
        assignments.push(("image", Value::Text(image.clone())));
    }
    if let Some(color) = &changes.color {
        assignments.push(("color", Value::Text(color.clone())));
    }
    if let Some(group) = changes.group {
        assignments.push(("group", Value::Integer(group)));
    }
    if let Some(creator_id) = &changes.creator_id {
        assignments.push(("creatorId", Value::Text(creator_id.clone())));
    }

    let columns: Vec<String> = assignments
        .iter()
        .map(|(column, _)| format!("`{}` = ?", column))
        .collect();
    let sql = format!(
        "UPDATE `Tags` SET {}, `updatedAt` = ? WHERE `id` = ?",
        columns.join(", ")
    );
    let now = database::now();

    let rows = on_pool!(db, pool => {
        let mut query = sqlx::query(&sql);
        for (_, value) in &assignments {
            query = match value {
                Value::Text(text) => query.bind(text.clone()),
                Value::Integer(number) => query.bind(*number),
            };
        }
        query.bind(now).bind(id).execute(pool).await?.rows_affected()
    });

    // MySQL reports zero affected rows when the values did not change.
    debug!("Updated tag {} ({} rows)", id, rows);
    find(db, id).await
}

/// Join rows referencing the tag are removed by the cascade.
pub async fn delete(db: &Db, id: i64) -> Result<bool, AppError> {
    let rows = on_pool!(db, pool => {
        sqlx::query("DELETE FROM `Tags` WHERE `id` = ?")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected()
    });

    let deleted = rows > 0;
    if deleted {
        info!("Deleted tag {}", id);
    }
    Ok(deleted)
}
