use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://aaboston.org/meetings?tsml-day=";
pub const DEFAULT_OUTPUT_DIR: &str = "assets";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const ENV_PREFIX: &str = "MEETINGS";

/// Harvester settings: built-in defaults overlaid by `MEETINGS_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarvestConfig {
    /// Listing URL up to (and including) the day-index query parameter.
    pub base_url: String,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub user_agent: String,
}

impl HarvestConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    /// Defaults overlaid by `env`.
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("log_dir", DEFAULT_LOG_DIR)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Listing page for day `day_num` (0 = Sunday).
    pub fn day_url(&self, day_num: usize) -> String {
        format!("{}{}", self.base_url, day_num)
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_url_appends_index() {
        let cfg = HarvestConfig::default();
        assert_eq!(cfg.day_url(0), "https://aaboston.org/meetings?tsml-day=0");
        assert_eq!(cfg.day_url(6), "https://aaboston.org/meetings?tsml-day=6");
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_without_env() {
        let cfg = HarvestConfig::from_env(env(&[])).unwrap();
        assert_eq!(cfg, HarvestConfig::default());
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = HarvestConfig::from_env(env(&[
            ("MEETINGS_OUTPUT_DIR", "/tmp/meetings"),
            ("MEETINGS_BASE_URL", "https://meetings.test/meetings?tsml-day="),
        ]))
        .unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/meetings"));
        assert_eq!(cfg.day_url(3), "https://meetings.test/meetings?tsml-day=3");
        assert_eq!(cfg.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn other_prefixes_are_ignored() {
        let cfg = HarvestConfig::from_env(env(&[("OTHER_OUTPUT_DIR", "/tmp/elsewhere")])).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }
}
