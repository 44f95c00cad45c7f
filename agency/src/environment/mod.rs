use agency_api_rest::RestServerConfig;
use agency_config::Config;
use agency_core_health_impl::HealthFeatureConfig;
use agency_di::provider;
use types::Database;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        database: Database,
        ..config: ConfigProvider {
            RestServerConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, database: Database) -> Self {
        Self {
            _cache: Default::default(),
            database,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        rest_server_config: RestServerConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            _cache: Default::default(),
            rest_server_config,
            health_feature_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use agency_di::Provide;
    use agency_persistence_postgres::PostgresDatabase;
    use types::{RestServer, SubmissionFeature};

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = agency_config::load().unwrap();
        let config_provider = ConfigProvider::new(&config);

        let database = PostgresDatabase::dummy().await;

        let mut provider = Provider::new(config_provider, database);
        let _: RestServer = provider.provide();
        let _: SubmissionFeature = provider.provide();
    }
}
