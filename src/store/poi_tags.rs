use log::info;

use crate::database::{self, Db};
use crate::error::AppError;
use crate::models::poi_tag::PoiTag;
use crate::models::tag::Tag;

/// Returns `false` when the pair is already linked. The existence check and
/// the insert are one statement, so concurrent calls cannot both insert.
pub async fn link(db: &Db, tag_id: i64, poi_id: i64) -> Result<bool, AppError> {
    let sql = format!(
        "{} INTO `POITag` (`TagId`, `POIId`, `createdAt`, `updatedAt`) VALUES (?, ?, ?, ?)",
        db.dialect().insert_ignore()
    );
    let now = database::now();
    let rows = on_pool!(db, pool => {
        sqlx::query(&sql)
            .bind(tag_id)
            .bind(poi_id)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await?
            .rows_affected()
    });

    let linked = rows > 0;
    if linked {
        info!("Linked tag {} to POI {}", tag_id, poi_id);
    }
    Ok(linked)
}

pub async fn unlink(db: &Db, tag_id: i64, poi_id: i64) -> Result<bool, AppError> {
    let rows = on_pool!(db, pool => {
        sqlx::query("DELETE FROM `POITag` WHERE `TagId` = ? AND `POIId` = ?")
            .bind(tag_id)
            .bind(poi_id)
            .execute(pool)
            .await?
            .rows_affected()
    });
    Ok(rows > 0)
}

pub async fn pois_for_tag(db: &Db, tag_id: i64) -> Result<Vec<i64>, AppError> {
    let rows = on_pool!(db, pool => {
        sqlx::query_as::<_, PoiTag>(
            "SELECT `TagId`, `POIId` FROM `POITag` WHERE `TagId` = ? ORDER BY `POIId`",
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await?
    });
    Ok(rows.into_iter().map(|row| row.poi_id).collect())
}

pub async fn tags_for_poi(db: &Db, poi_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = on_pool!(db, pool => {
        sqlx::query_as::<_, Tag>(
            "SELECT t.`id` AS `id`, t.`name` AS `name`, t.`image` AS `image`, \
             t.`color` AS `color`, t.`group` AS `group`, t.`creatorId` AS `creatorId`, \
             t.`createdAt` AS `createdAt`, t.`updatedAt` AS `updatedAt` \
             FROM `Tags` t \
             JOIN `POITag` pt ON pt.`TagId` = t.`id` \
             WHERE pt.`POIId` = ? \
             ORDER BY t.`id`",
        )
        .bind(poi_id)
        .fetch_all(pool)
        .await?
    });
    Ok(tags)
}
