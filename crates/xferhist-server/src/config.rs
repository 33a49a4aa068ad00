use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};
use url::Url;
use xferhist_search::SearchConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchSettings,
    /// Search backend holding the action indices
    #[serde(default)]
    pub elastic: ElasticConfig,
    /// Chain node used for the last irreversible block
    #[serde(default)]
    pub chain_rpc: ChainRpcConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        // Server validations
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        // Search validations
        if self.search.chain.trim().is_empty() {
            return Err("search.chain must not be empty".into());
        }
        if self.search.max_results == 0 {
            return Err("search.max_results must be > 0".into());
        }
        // Collaborator endpoints
        Url::parse(&self.elastic.url).map_err(|e| format!("elastic.url is invalid: {e}"))?;
        if self.elastic.timeout_ms == 0 {
            return Err("elastic.timeout_ms must be > 0".into());
        }
        if self.elastic.user.is_some() != self.elastic.password.is_some() {
            return Err("elastic.user and elastic.password must be set together".into());
        }
        Url::parse(&self.chain_rpc.url).map_err(|e| format!("chain_rpc.url is invalid: {e}"))?;
        if self.chain_rpc.timeout_ms == 0 {
            return Err("chain_rpc.timeout_ms must be > 0".into());
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            chain: self.search.chain.clone(),
            max_results: self.search.max_results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    7000
}
fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Chain name, prefixes the action index pattern
    #[serde(default = "default_chain")]
    pub chain: String,
    /// Hard cap for `limit`
    #[serde(default = "default_max_results")]
    pub max_results: u64,
}

fn default_chain() -> String {
    "eos".into()
}
fn default_max_results() -> u64 {
    1000
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticConfig {
    #[serde(default = "default_elastic_url")]
    pub url: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_elastic_url() -> String {
    "http://127.0.0.1:9200".into()
}

impl ElasticConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            url: default_elastic_url(),
            user: None,
            password: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRpcConfig {
    #[serde(default = "default_chain_rpc_url")]
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_chain_rpc_url() -> String {
    "http://127.0.0.1:8888".into()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl ChainRpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ChainRpcConfig {
    fn default() -> Self {
        Self {
            url: default_chain_rpc_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub const DEFAULT_CONFIG_PATH: &str = "xferhist.toml";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_PATH));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        // Environment variable overrides, e.g., XFERHIST__SEARCH__CHAIN=wax
        builder = builder.add_source(
            Environment::with_prefix("XFERHIST")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.search.chain, "eos");
        assert_eq!(cfg.search.max_results, 1000);
        assert_eq!(cfg.search_config().action_index(), "eos-action-*");
    }

    #[test]
    fn rejects_half_configured_basic_auth() {
        let mut cfg = AppConfig::default();
        cfg.elastic.user = Some("elastic".into());
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("elastic.user"));
    }

    #[test]
    fn rejects_bad_urls_and_levels() {
        let mut cfg = AppConfig::default();
        cfg.chain_rpc.url = "not a url".into();
        assert!(cfg.validate().unwrap_err().starts_with("chain_rpc.url"));

        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().unwrap_err().starts_with("logging.level"));
    }

    #[test]
    fn addr_falls_back_to_unspecified_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "localhost-ish".into();
        cfg.server.port = 7100;
        assert_eq!(cfg.addr().to_string(), "0.0.0.0:7100");
    }
}
