//! Relay a caller's message into a Slack channel under the
//! [anonymous display name](crate::slack::message::DISPLAY_NAME).

use crate::{
    reply::{fault, reply, Reply},
    router::Deps,
    slack::{error::SlackError, message::OutboundMessage},
};
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use axum_extra::headers::{ContentType, HeaderMapExt};
use hyper::body::Bytes;
use mime::Mime;
use tracing::{info, warn};

pub const INVALID_REQUEST: &str = "Invalid request";

pub const POSTED: &str = "Message posted successfully";

/// Handler for the POST route `/post_message`.
///
/// `X-Slack-Request-Timestamp` and `X-Slack-Signature` headers signing the raw
/// body with the shared signing secret must be present; this is checked before
/// anything else about the request. A body we can't read, such as one over
/// the size limit, can't carry a valid signature either.
///
/// Accepts an [OutboundMessage] in `application/json` format.
pub async fn post_message_handler(
    State(deps): State<Deps>,
    headers: HeaderMap,
    // We can't parse this at all yet as we need to compare signatures.
    body_bytes: Result<Bytes, BytesRejection>,
) -> Response {
    let body_bytes = match body_bytes {
        Ok(x) => x,
        Err(e) => {
            warn!(error = %e, "Rejected unreadable request body");
            return reply(StatusCode::BAD_REQUEST, Reply::error(INVALID_REQUEST));
        }
    };

    if !deps.verifier.verify(&body_bytes, &headers) {
        warn!("Rejected request with invalid Slack signature");
        return reply(StatusCode::BAD_REQUEST, Reply::error(INVALID_REQUEST));
    }

    if !is_json(&headers) {
        return reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Reply::error("Requests must have `Content-Type: application/json`"),
        );
    }

    let msg = match serde_json::from_slice::<OutboundMessage>(&body_bytes) {
        Ok(x) => x,
        Err(e) => {
            warn!(error = %e, "Failed to deserialize payload");

            return reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Reply::error(format!("Failed to deserialize payload: {}", e)),
            );
        }
    };

    let res = deps
        .slack
        .post_message(&msg.access_token, &msg.channel_id, &msg.message)
        .await;

    match res {
        Ok(()) => {
            info!(channel = %msg.channel_id, "Relayed message");
            reply(StatusCode::OK, Reply::message(POSTED))
        }
        Err(e @ SlackError::Request(_)) => fault(&e),
        Err(e) => {
            warn!(channel = %msg.channel_id, error = %e, "Slack refused message");
            reply(StatusCode::BAD_REQUEST, Reply::error(e))
        }
    }
}

/// Whether the request declares a JSON body, ignoring parameters such as
/// `charset`.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .typed_get::<ContentType>()
        .map(Mime::from)
        .map(|m| m.type_() == mime::APPLICATION && m.subtype() == mime::JSON)
        .unwrap_or(false)
}
