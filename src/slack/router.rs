//! Slack subrouter definition.
//!
//! The following subroute is supported:
//!
//! - GET: `/oauth/callback`

use crate::{
    reply::{fault, reply, Reply},
    router::Deps,
    slack::{error::SlackError, oauth::AuthorizationCode},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, warn};

/// Reported when Slack's token endpoint answers with a non-200 status. Slack's
/// own body isn't forwarded in this case.
pub const TOKEN_FAILURE: &str = "Failed to get access token";

pub const MISSING_CODE: &str = "Missing authorization code";

/// Instantiate a new Slack subrouter.
pub fn slack_router() -> Router<Deps> {
    Router::new().route("/oauth/callback", get(oauth_callback_handler))
}

/// The query Slack redirects users back with. `error` is set instead of `code`
/// when the user declines to install the app.
#[derive(Deserialize)]
struct CallbackParams {
    code: Option<AuthorizationCode>,
    error: Option<String>,
}

/// Handler for the GET subroute `/oauth/callback`.
///
/// Exchanges the `code` query param for an access token, which is returned to
/// the caller as-is.
async fn oauth_callback_handler(
    State(deps): State<Deps>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let code = match params {
        CallbackParams { code: Some(x), .. } => x,
        CallbackParams { error: Some(e), .. } => {
            info!(error = %e, "OAuth authorization was not granted");
            return reply(StatusCode::BAD_REQUEST, Reply::error(e));
        }
        _ => return reply(StatusCode::BAD_REQUEST, Reply::error(MISSING_CODE)),
    };

    match deps.slack.exchange_token(&code).await {
        Ok(token) => reply(StatusCode::OK, Reply::token(token)),
        Err(SlackError::Status(status)) => {
            warn!(%status, "Slack token endpoint failed");
            reply(StatusCode::BAD_REQUEST, Reply::error(TOKEN_FAILURE))
        }
        Err(SlackError::Api(e)) => {
            warn!(error = %e, "Slack refused authorization code");
            reply(StatusCode::BAD_REQUEST, Reply::error(e))
        }
        Err(e @ SlackError::Request(_)) => fault(&e),
    }
}
