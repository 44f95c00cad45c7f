use agency_config::Config;
use agency_di::Provide;
use agency_persistence_contracts::Database;
use anyhow::Context;
use tracing::info;

use crate::{
    database,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database
        .ping()
        .await
        .context("Database is not reachable")?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, database);
    let server: RestServer = provider.provide();
    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
