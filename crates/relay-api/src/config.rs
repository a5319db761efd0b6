use std::{env, str::FromStr};

use thiserror::Error;

pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_GOOGLE_SCOPE: &str = "https://www.googleapis.com/auth/business.manage";
pub const DEFAULT_SUCCESS_REDIRECT: &str = "/settings?google=connected";

/// Accepted range for `OAUTH_STATE_EXPIRY_MINUTES`, at most one day
pub const STATE_EXPIRY_MINUTES_RANGE: std::ops::RangeInclusive<i64> = 1..=1440;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for configuration variable {var}")]
    Invalid { var: &'static str, value: String },
}

/// Deployment environment, drives log format and security headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_auth_url: String,
    pub google_token_url: String,
    pub google_scope: String,
    pub settings_api_url: String,
    pub settings_api_key: String,
    pub state_secret: String,
    pub state_expiry_minutes: i64,
    pub upstream_timeout_secs: u64,
    pub success_redirect: String,
    pub env: Environment,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[cfg(feature = "shuttle")]
    pub fn from_shuttle_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Build the configuration from any key/value source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            google_client_id: required("GOOGLE_CLIENT_ID")?,
            google_client_secret: required("GOOGLE_CLIENT_SECRET")?,
            google_redirect_uri: required("GOOGLE_REDIRECT_URI")?,
            google_auth_url: get("GOOGLE_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_AUTH_URL.to_string()),
            google_token_url: get("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string()),
            google_scope: get("GOOGLE_OAUTH_SCOPE").unwrap_or_else(|| DEFAULT_GOOGLE_SCOPE.to_string()),
            settings_api_url: required("BOLT_API_URL")?,
            settings_api_key: required("BOLT_API_KEY")?,
            state_secret: required("OAUTH_STATE_SECRET")?,
            state_expiry_minutes: parse_in_range(
                "OAUTH_STATE_EXPIRY_MINUTES",
                get("OAUTH_STATE_EXPIRY_MINUTES"),
                10,
                STATE_EXPIRY_MINUTES_RANGE,
            )?,
            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", get("UPSTREAM_TIMEOUT_SECS"), 10)?,
            success_redirect: get("SUCCESS_REDIRECT_URL")
                .unwrap_or_else(|| DEFAULT_SUCCESS_REDIRECT.to_string()),
            env: parse_or("ENV", get("ENV"), Environment::Development)?,
            port: parse_or("PORT", get("PORT"), 3000)?,
        })
    }
}

fn parse_or<T: FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn parse_in_range(
    var: &'static str,
    value: Option<String>,
    default: i64,
    range: std::ops::RangeInclusive<i64>,
) -> Result<i64, ConfigError> {
    let parsed = parse_or(var, value, default)?;
    if !range.contains(&parsed) {
        return Err(ConfigError::Invalid {
            var,
            value: parsed.to_string(),
        });
    }
    Ok(parsed)
}
