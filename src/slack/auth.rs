//! Credentials exchanged with Slack: per-request access tokens and the
//! app-level OAuth client credentials.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// A newtype wrapper around Slack access tokens.
///
/// Tokens are supplied by callers per request and never stored.
#[derive(Debug, Deserialize)]
#[serde(from = "String")]
pub struct SlackAccessToken(pub SecretString);

impl From<String> for SlackAccessToken {
    fn from(x: String) -> Self {
        SlackAccessToken(SecretString::from(x))
    }
}

impl From<&str> for SlackAccessToken {
    fn from(x: &str) -> Self {
        Self::from(x.to_owned())
    }
}

/// The app's OAuth client ID, as shown on the app's "Basic Information" page.
#[derive(Debug, PartialEq, Eq)]
pub struct ClientId(pub String);

/// The app's OAuth client secret.
#[derive(Debug)]
pub struct ClientSecret(pub SecretString);

impl From<String> for ClientSecret {
    fn from(x: String) -> Self {
        ClientSecret(SecretString::from(x))
    }
}

impl From<&str> for ClientSecret {
    fn from(x: &str) -> Self {
        Self::from(x.to_owned())
    }
}

/// Everything Slack needs alongside an authorization code to issue a token.
///
/// The redirect URI is kept verbatim: Slack compares it byte for byte against
/// the one used to start the authorization.
#[derive(Debug)]
pub struct OAuthCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_uri: String,
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0.expose_secret())
}
