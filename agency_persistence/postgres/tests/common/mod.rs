use agency_models::submission::FormSubmission;
use agency_persistence_contracts::{Database, Transaction};
use agency_persistence_postgres::{
    submission::PostgresSubmissionRepository, PostgresDatabase, PostgresDatabaseConfig,
};

pub type Db = PostgresDatabase;

/// Returns a migrated database together with the demo submissions stored in it.
pub async fn setup() -> (Db, Vec<FormSubmission>) {
    let db = setup_clean().await;

    db.run_migrations(None).await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let submissions = agency_demo::create(&mut txn, PostgresSubmissionRepository)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    (db, submissions)
}

pub async fn setup_clean() -> Db {
    let config = agency_config::load().unwrap();

    let db = Db::connect(&PostgresDatabaseConfig {
        url: config.database.url,
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        acquire_timeout: config.database.acquire_timeout.into(),
        idle_timeout: config.database.idle_timeout.map(Into::into),
        max_lifetime: config.database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.reset().await.unwrap();
    db
}
