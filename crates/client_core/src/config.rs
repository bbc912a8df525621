//! Client configuration: built-in defaults, an optional TOML file, then
//! environment overrides. The GUI applies its CLI flags on top.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://recruit.xust-kcsoft.club/interfaces/main";
pub const DEFAULT_CONFIG_FILE: &str = "recruit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url '{raw}': {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("base url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("unknown stale major policy '{0}'")]
    UnknownStalePolicy(String),
}

/// What to do with a major list that arrives after the college changed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleMajorPolicy {
    /// Drop responses whose college no longer matches the selection.
    #[default]
    DiscardStale,
    /// Apply whichever response arrives last.
    LastArrivalWins,
}

impl std::str::FromStr for StaleMajorPolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "discard-stale" => Ok(Self::DiscardStale),
            "last-arrival-wins" => Ok(Self::LastArrivalWins),
            other => Err(ConfigError::UnknownStalePolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub stale_majors: StaleMajorPolicy,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    stale_majors: Option<StaleMajorPolicy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stale_majors: StaleMajorPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Loads `explicit_path` if given (missing file is an error), otherwise
    /// `recruit.toml` when present, then applies process environment.
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()),
        };
        if let Some(path) = path {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            config
                .apply_toml(&raw)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded client config file");
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(())
    }

    pub fn apply_toml(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileConfig = toml::from_str(raw)?;
        if let Some(base_url) = file.base_url {
            self.set_base_url(&base_url)?;
        }
        if let Some(policy) = file.stale_majors {
            self.stale_majors = policy;
        }
        Ok(())
    }

    /// Later keys win: `APP__BASE_URL` overrides `RECRUIT_BASE_URL`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        for key in ["RECRUIT_BASE_URL", "APP__BASE_URL"] {
            if let Some(value) = lookup(key) {
                self.set_base_url(&value)?;
            }
        }
        if let Some(value) = lookup("APP__STALE_MAJORS") {
            self.stale_majors = value.parse()?;
        }
        Ok(())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        raw: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_point_at_production_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.stale_majors, StaleMajorPolicy::DiscardStale);
    }

    #[test]
    fn toml_overrides_defaults_and_trims_trailing_slash() {
        let mut config = ClientConfig::default();
        config
            .apply_toml(
                r#"
base_url = "http://127.0.0.1:8080/interfaces/main/"
stale_majors = "last-arrival-wins"
"#,
            )
            .expect("valid toml");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/interfaces/main");
        assert_eq!(config.stale_majors, StaleMajorPolicy::LastArrivalWins);
    }

    #[test]
    fn env_overrides_apply_in_order() {
        let env = HashMap::from([
            ("RECRUIT_BASE_URL", "http://first.example"),
            ("APP__BASE_URL", "https://second.example/api"),
            ("APP__STALE_MAJORS", "last-arrival-wins"),
        ]);
        let mut config = ClientConfig::default();
        config
            .apply_env(|key| env.get(key).map(|value| value.to_string()))
            .expect("valid env");
        assert_eq!(config.base_url(), "https://second.example/api");
        assert_eq!(config.stale_majors, StaleMajorPolicy::LastArrivalWins);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = ClientConfig::default();
        assert!(matches!(
            config.set_base_url("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            config.set_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn unknown_stale_policy_is_an_error() {
        let mut config = ClientConfig::default();
        let result = config.apply_env(|key| (key == "APP__STALE_MAJORS").then(|| "newest".to_string()));
        assert!(matches!(result, Err(ConfigError::UnknownStalePolicy(_))));
    }

    #[test]
    fn explicit_missing_config_file_fails() {
        let missing = std::env::temp_dir().join("recruit_client_missing_config.toml");
        let err = ClientConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
