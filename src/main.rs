use log::{error, info};

use poi_tags::config::Config;
use poi_tags::database;
use poi_tags::error::AppError;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let (db, registry) = database::bootstrap(&config).await?;

    for model in registry.models() {
        info!("Model {} ready in table {}", model.name, model.table_name);
    }
    info!("Schema: {}", serde_json::to_string(&registry)?);

    db.close().await;
    Ok(())
}
