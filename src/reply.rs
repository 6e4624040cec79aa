//! The JSON envelope every API route replies with.
//!
//! ```json
//! { "ok": true, "access_token": "xoxb-..." }
//! { "ok": true, "message": "Message posted successfully" }
//! { "ok": false, "error": "channel_not_found" }
//! ```

use crate::slack::{auth::SlackAccessToken, error::SlackError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::error;

#[skip_serializing_none]
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    pub access_token: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Reply {
    pub fn token(token: SlackAccessToken) -> Self {
        Self {
            ok: true,
            access_token: Some(token.0.expose_secret().to_owned()),
            message: None,
            error: None,
        }
    }

    pub fn message<T: ToString>(message: T) -> Self {
        Self {
            ok: true,
            access_token: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn error<T: ToString>(error: T) -> Self {
        Self {
            ok: false,
            access_token: None,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Pair a [Reply] with its status code.
pub fn reply(code: StatusCode, body: Reply) -> Response {
    (code, Json(body)).into_response()
}

/// An error we don't translate for the caller. Logged in full, but the
/// response carries no detail.
pub fn fault(e: &SlackError) -> Response {
    error!(error = %e, "Unhandled Slack failure");

    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_omits_absent_fields() {
        assert_eq!(
            serde_json::to_string(&Reply::token(SlackAccessToken::from("T"))).unwrap(),
            r#"{"ok":true,"access_token":"T"}"#
        );

        assert_eq!(
            serde_json::to_string(&Reply::message("Message posted successfully")).unwrap(),
            r#"{"ok":true,"message":"Message posted successfully"}"#
        );

        assert_eq!(
            serde_json::to_string(&Reply::error("Invalid request")).unwrap(),
            r#"{"ok":false,"error":"Invalid request"}"#
        );
    }
}
