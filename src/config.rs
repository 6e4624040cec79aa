//! Process configuration, read once from the environment at startup.
//!
//! Required:
//!
//! - `SLACK_CLIENT_ID`
//! - `SLACK_CLIENT_SECRET`
//! - `SLACK_SIGNING_SECRET`
//! - `REDIRECT_URI`, an absolute URL
//!
//! Optional:
//!
//! - `PORT`, defaulting to 3000
//! - `SLACK_API_BASE`, defaulting to Slack's production API

use crate::slack::{
    api::API_BASE,
    auth::{ClientId, ClientSecret, OAuthCredentials},
    signature::SigningSecret,
};
use std::env;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No ${0} environment variable found")]
    Missing(&'static str),

    #[error("${0} is not an absolute URL: {1}")]
    InvalidUrl(&'static str, #[source] url::ParseError),

    #[error("Could not parse $PORT to u16: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug)]
pub struct Config {
    pub credentials: OAuthCredentials,
    pub signing_secret: SigningSecret,
    pub api_base: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any source of variables. Empty values count as
    /// absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let client_id = required("SLACK_CLIENT_ID")?;
        let client_secret = required("SLACK_CLIENT_SECRET")?;
        let signing_secret = required("SLACK_SIGNING_SECRET")?;

        // Validated, but forwarded verbatim as Slack matches it exactly.
        let redirect_uri = required("REDIRECT_URI")?;
        Url::parse(&redirect_uri).map_err(|e| ConfigError::InvalidUrl("REDIRECT_URI", e))?;

        let api_base = optional("SLACK_API_BASE").unwrap_or_else(|| API_BASE.to_owned());
        Url::parse(&api_base).map_err(|e| ConfigError::InvalidUrl("SLACK_API_BASE", e))?;

        let port = match optional("PORT") {
            Some(x) => x.parse().map_err(|_| ConfigError::InvalidPort(x))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            credentials: OAuthCredentials {
                client_id: ClientId(client_id),
                client_secret: ClientSecret::from(client_secret),
                redirect_uri,
            },
            signing_secret: SigningSecret::from(signing_secret),
            api_base,
            port,
        })
    }
}
