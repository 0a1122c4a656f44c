use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PoiTag {
    #[sqlx(rename = "TagId")]
    pub tag_id: i64,
    #[sqlx(rename = "POIId")]
    pub poi_id: i64,
}
