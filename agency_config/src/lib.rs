use std::{collections::HashMap, net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files, applied in order on top
/// of the bundled defaults.
pub const CONFIG_PATHS_ENV: &str = "AGENCY_CONFIG";

/// Prefix of environment variables that override single keys, e.g.
/// `AGENCY__DATABASE__URL`.
pub const ENV_PREFIX: &str = "AGENCY";

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Load the bundled defaults, the files listed in `AGENCY_CONFIG` and the
/// `AGENCY__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATHS_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();

    let files = paths
        .iter()
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| read_file(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    build(&files, environment(None))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))
}

fn environment(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .source(source)
}

fn build(files: &[String], environment: Environment) -> anyhow::Result<Config> {
    files
        .iter()
        .fold(
            config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            |builder, content| builder.add_source(File::from_str(content, FileFormat::Toml)),
        )
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Environment {
        environment(Some(HashMap::new()))
    }

    #[test]
    fn load_default_config() {
        let config = build(&[], no_env()).unwrap();

        assert_eq!(config.http.address, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(
            *config.health.cache_ttl,
            std::time::Duration::from_secs(10)
        );
        assert_eq!(config.database.max_lifetime, None);
    }

    #[test]
    fn default_config_path_matches_bundled_config() {
        let content = std::fs::read_to_string(DEFAULT_CONFIG_PATH).unwrap();
        assert_eq!(content, DEFAULT_CONFIG);
    }

    #[test]
    fn files_override_defaults() {
        let files = [
            "[http]\naddress = \"0.0.0.0:80\"\n".to_owned(),
            "[database]\nmax_lifetime = \"30m\"\n".to_owned(),
        ];

        let config = build(&files, no_env()).unwrap();

        assert_eq!(config.http.address, "0.0.0.0:80".parse().unwrap());
        assert_eq!(
            config.database.max_lifetime.map(|x| x.0),
            Some(std::time::Duration::from_secs(30 * 60))
        );
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn environment_overrides_files() {
        let files = ["[database]\nurl = \"postgres://file\"\n".to_owned()];
        let env = environment(Some(HashMap::from([
            (
                "AGENCY__DATABASE__URL".to_owned(),
                "postgres://env".to_owned(),
            ),
            ("AGENCY__DATABASE__MAX_CONNECTIONS".to_owned(), "3".to_owned()),
        ])));

        let config = build(&files, env).unwrap();

        assert_eq!(config.database.url, "postgres://env");
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn invalid_config() {
        let files = ["[health]\ncache_ttl = \"soon\"\n".to_owned()];
        assert!(build(&files, no_env()).is_err());
    }
}
