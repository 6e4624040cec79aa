//! Exchange OAuth authorization codes for access tokens.
//!
//! Slack redirects the installing user to our callback with a single-use
//! `code`, which we trade for a token along with the app's client credentials.
//! The token is handed straight back to the caller; storing it is their
//! concern.
//!
//! <https://api.slack.com/methods/oauth.v2.access>

use super::{
    api::{send, SlackClient},
    auth::SlackAccessToken,
    error::SlackError,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// A newtype wrapper around the authorization code issued by Slack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizationCode(pub String);

/// <https://api.slack.com/methods/oauth.v2.access#args>
#[derive(Serialize)]
struct AccessRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// <https://api.slack.com/methods/oauth.v2.access#examples>
#[derive(Deserialize)]
struct AccessResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::ok_true")]
    ok: bool,
    access_token: String,
}

impl SlackClient {
    /// Trade an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<SlackAccessToken, SlackError> {
        let creds = &self.credentials;

        let res: AccessResponse = send(self.post_anonymous("/oauth.v2.access").form(
            &AccessRequest {
                client_id: &creds.client_id.0,
                client_secret: creds.client_secret.0.expose_secret(),
                code: &code.0,
                redirect_uri: &creds.redirect_uri,
            },
        ))
        .await?;

        Ok(SlackAccessToken::from(res.access_token))
    }
}
