use poi_tags::config::Config;
use poi_tags::database::{self, Db};

/// Fresh in-memory database with all tables synced.
pub async fn setup() -> Db {
    let config = Config::from_parts("sqlite::memory:".to_string(), None).unwrap();
    let (db, _registry) = database::bootstrap(&config).await.unwrap();
    db
}
