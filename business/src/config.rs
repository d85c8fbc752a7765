use std::any::Any;
use std::env::vars;

use log::info;
use serde::Deserialize;
use thiserror::Error;
use userreg_states::{State, state_assign_impl};

/// Base URL of the demo user API.
pub const DEFAULT_API_BASE_URL: &str = "https://dummyapi.io/data/v1";

/// Application id the demo API expects in the `app-id` header.
pub const DEFAULT_APP_ID: &str = "63473330c1927d386ca6a3a5";

/// Only the first page is ever requested.
pub const DEFAULT_PAGE: u32 = 1;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("PAGE_LIMIT must be greater than zero")]
    ZeroPageLimit,
}

/// Where and how the remote user API is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub app_id: String,
    pub page: u32,
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            app_id: DEFAULT_APP_ID.to_owned(),
            page: DEFAULT_PAGE,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// Every variable is optional; missing ones fall back to the constants above.
#[derive(Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    app_id: Option<String>,
    page_limit: Option<u32>,
}

impl ApiConfig {
    /// Config pointing at `base_url` with the default app id, used by tests
    /// to target a mock server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from `API_BASE_URL`, `APP_ID` and `PAGE_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading API configuration from environment variables");
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            api_base_url,
            app_id,
            page_limit,
        } = raw;

        let defaults = Self::default();
        let page_limit = match page_limit {
            Some(0) => return Err(ConfigError::ZeroPageLimit),
            Some(limit) => limit,
            None => defaults.page_limit,
        };

        let api_base_url = match api_base_url {
            Some(url) if !url.trim().is_empty() => {
                info!("Using provided API_BASE_URL: {url}");
                url.trim_end_matches('/').to_owned()
            }
            _ => defaults.api_base_url,
        };

        Ok(Self {
            api_base_url,
            app_id: app_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.app_id),
            page: defaults.page,
            page_limit,
        })
    }

    /// `GET` endpoint for the configured page.
    pub fn list_users_url(&self) -> String {
        format!(
            "{}/user?page={}&limit={}",
            self.api_base_url, self.page, self.page_limit
        )
    }

    pub fn create_user_url(&self) -> String {
        format!("{}/user/create", self.api_base_url)
    }
}

impl State for ApiConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn default_points_at_demo_api() {
        let config = ApiConfig::default();
        assert_eq!(
            config.list_users_url(),
            "https://dummyapi.io/data/v1/user?page=1&limit=10"
        );
        assert_eq!(
            config.create_user_url(),
            "https://dummyapi.io/data/v1/user/create"
        );
        assert_eq!(config.app_id, "63473330c1927d386ca6a3a5");
    }

    #[test]
    fn env_overrides_are_applied() {
        let raw: RawConfig = from_iter(vec![
            ("API_BASE_URL", "http://localhost:9000/"),
            ("APP_ID", "local-app"),
            ("PAGE_LIMIT", "25"),
        ])
        .expect("RawConfig should deserialize");

        let config = ApiConfig::from_raw(raw).expect("config should build");
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.app_id, "local-app");
        assert_eq!(config.page_limit, 25);
        assert_eq!(
            config.list_users_url(),
            "http://localhost:9000/user?page=1&limit=25"
        );
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let raw: RawConfig =
            from_iter(Vec::<(&str, &str)>::new()).expect("RawConfig should deserialize");

        let config = ApiConfig::from_raw(raw).expect("config should build");
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn zero_page_limit_is_rejected() {
        let raw: RawConfig =
            from_iter(vec![("PAGE_LIMIT", "0")]).expect("RawConfig should deserialize");

        let err = ApiConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("PAGE_LIMIT"));
    }

    #[test]
    fn new_only_changes_base_url() {
        let config = ApiConfig::new("http://127.0.0.1:1234");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1234");
        assert_eq!(config.app_id, DEFAULT_APP_ID);
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
    }
}
