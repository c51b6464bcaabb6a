use serde::Deserialize;
use std::path::PathBuf;

use crate::services::{divergence::DEFAULT_SIM_MIN, ranking::DEFAULT_TOP_K, CompareOptions};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; when set, reviews are read from the database
    #[serde(default)]
    pub database_url: Option<String>,

    /// JSON review fixture used when no database is configured
    #[serde(default)]
    pub reviews_fixture: Option<PathBuf>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Ranked list length used when a request does not give `k`
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Similarity threshold used when a request does not give `sim_min`
    #[serde(default = "default_sim_min")]
    pub default_sim_min: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_sim_min() -> f64 {
    DEFAULT_SIM_MIN
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config
            .compare_defaults()
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid comparison defaults: {}", e))?;
        Ok(config)
    }

    /// Comparison options applied when a request leaves them out
    pub fn compare_defaults(&self) -> CompareOptions {
        CompareOptions {
            k: self.default_top_k,
            sim_min: self.default_sim_min,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.database_url.is_none());
        assert!(config.reviews_fixture.is_none());
        assert_eq!(config.compare_defaults(), CompareOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("REVIEWS_FIXTURE", "fixtures/reviews.json"),
            ("DEFAULT_TOP_K", "10"),
            ("DEFAULT_SIM_MIN", "0.6"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.reviews_fixture, Some(PathBuf::from("fixtures/reviews.json")));
        assert_eq!(config.compare_defaults().k, 10);
        assert_eq!(config.compare_defaults().sim_min, 0.6);
    }

    #[test]
    fn test_invalid_defaults_are_rejected() {
        assert!(Config::from_vars(vars(&[("DEFAULT_TOP_K", "0")])).is_err());
        assert!(Config::from_vars(vars(&[("DEFAULT_SIM_MIN", "2")])).is_err());
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
