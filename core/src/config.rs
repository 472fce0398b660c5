//! Client configuration.
//!
//! `ClientConfig::from_env` reads `POSTS_API_BASE_URL` and
//! `POSTS_DELETE_POLICY`; anything unset falls back to the defaults.

use std::str::FromStr;

use crate::error::ConfigError;

/// Where the `mock-server` binary listens with its default `PORT`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9999/api/hw33";
pub const BASE_URL_VAR: &str = "POSTS_API_BASE_URL";
pub const DELETE_POLICY_VAR: &str = "POSTS_DELETE_POLICY";

/// When a deleted post leaves the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Remove on click, before the request is sent. Not undone on failure.
    #[default]
    Eager,
    /// Remove once the server answers with a 2xx.
    Confirmed,
}

impl FromStr for DeletePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(DeletePolicy::Eager),
            "confirmed" => Ok(DeletePolicy::Confirmed),
            _ => Err(ConfigError::UnknownDeletePolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the `/posts` collection hangs off.
    pub base_url: String,
    pub delete_policy: DeletePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delete_policy: DeletePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            if base_url.trim().is_empty() {
                return Err(ConfigError::EmptyBaseUrl);
            }
            config.base_url = base_url.trim().to_string();
        }
        if let Some(policy) = lookup(DELETE_POLICY_VAR) {
            config.delete_policy = policy.parse()?;
        }
        Ok(config)
    }
}
