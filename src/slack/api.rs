//! Type definitions and helpers for the Slack Web API.

use super::{
    auth::{to_auth_header_val, OAuthCredentials, SlackAccessToken},
    error::SlackError,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A Slack client holding the app's OAuth credentials and a connection pool,
/// as per [reqwest::Client].
pub struct SlackClient {
    base: String,
    http: reqwest::Client,
    pub(super) credentials: OAuthCredentials,
}

impl SlackClient {
    /// `base` is normally [API_BASE]; tests point it at a mock server.
    pub fn new(base: String, credentials: OAuthCredentials) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub(super) fn post(&self, path: &str, token: &SlackAccessToken) -> reqwest::RequestBuilder {
        self.post_anonymous(path)
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }

    /// Create a POST request for endpoints authenticated by their arguments
    /// rather than a token, such as `oauth.v2.access`.
    pub(super) fn post_anonymous(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.base.clone() + path)
    }
}

/// Send a request and unwrap Slack's response envelope.
///
/// Any status other than 200 is reported as [SlackError::Status] without
/// looking at the body.
pub(super) async fn send<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T, SlackError> {
    let res = req.send().await?;

    let status = res.status();
    if status != reqwest::StatusCode::OK {
        debug!(%status, "Slack API responded with non-200 status");
        return Err(SlackError::Status(status));
    }

    match res.json::<APIResult<T>>().await? {
        APIResult::Ok(x) => Ok(x),
        APIResult::Err(res) => Err(SlackError::Api(res.error)),
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "access_token": "xoxb-..."
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_code"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// Successful response types must pin `ok` with `crate::de::ok_true` as well,
// or a success type without required fields would swallow failures.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::ok_false")]
    ok: bool,
    #[serde(default = "unknown_error")]
    pub error: String,
}

fn unknown_error() -> String {
    "unknown_error".to_owned()
}
