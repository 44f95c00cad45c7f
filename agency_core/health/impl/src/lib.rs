use std::{sync::Arc, time::Duration};

use agency_core_health_contracts::{HealthFeatureService, HealthStatus};
use agency_di::Build;
use agency_persistence_contracts::Database;
use agency_shared_contracts::time::TimeService;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Db> {
    time: Time,
    db: Db,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl CachedStatus {
    /// A ttl too large to be represented never expires.
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| self.timestamp.checked_add_signed(ttl))
            .map_or(true, |expires| now < expires)
    }
}

impl<Time, Db> HealthFeatureService for HealthFeatureServiceImpl<Time, Db>
where
    Time: TimeService,
    Db: Database,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let database = self
            .db
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping database: {err:#}"))
            .is_ok();

        let status = HealthStatus { database };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
