//! Post plain text messages to a Slack channel under a pseudonym.

use super::{
    api::{send, SlackClient},
    auth::SlackAccessToken,
    error::SlackError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The display name every relayed message is posted under, in place of the
/// token owner's real name.
pub const DISPLAY_NAME: &str = "Anonymous";

/// Slack channel IDs, such as `C024BE91L`. These can be found in the UI by
/// copying a link to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message to relay, fully specified by the caller.
///
/// Fields are required but otherwise passed through untouched; an empty
/// channel or message is Slack's to reject.
#[derive(Debug, Deserialize)]
pub struct OutboundMessage {
    pub access_token: SlackAccessToken,
    pub channel_id: ChannelId,
    pub message: String,
}

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a ChannelId,
    text: &'a str,
    username: &'static str,
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::ok_true")]
    ok: bool,
}

impl SlackClient {
    /// Post `text` to a channel as [DISPLAY_NAME], authenticating with the
    /// caller's token rather than one of our own.
    pub async fn post_message(
        &self,
        token: &SlackAccessToken,
        channel: &ChannelId,
        text: &str,
    ) -> Result<(), SlackError> {
        let _: MessageResponse = send(self.post("/chat.postMessage", token).json(
            &MessageRequest {
                channel,
                text,
                username: DISPLAY_NAME,
            },
        ))
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::auth::{ClientId, ClientSecret, OAuthCredentials};
    use mockito::Matcher;
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn client(base: String) -> SlackClient {
        SlackClient::new(
            base,
            OAuthCredentials {
                client_id: ClientId("any".to_owned()),
                client_secret: ClientSecret::from("any"),
                redirect_uri: "https://example.com".to_owned(),
            },
        )
    }

    #[test]
    fn test_outbound_message_requires_fields() {
        let full = r#"{"access_token": "x", "channel_id": "C1", "message": "hi"}"#;
        let msg: OutboundMessage = serde_json::from_str(full).unwrap();
        assert_eq!(msg.access_token.0.expose_secret(), "x");
        assert_eq!(msg.channel_id, ChannelId("C1".to_owned()));
        assert_eq!(msg.message, "hi");

        let missing = r#"{"access_token": "x", "channel_id": "C1"}"#;
        assert!(serde_json::from_str::<OutboundMessage>(missing).is_err());
    }

    #[tokio::test]
    async fn test_success() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxp-caller")
            .match_body(Matcher::Json(json!({
                "channel": "C1",
                "text": "hi",
                "username": "Anonymous",
            })))
            .with_body(r#"{"ok": true, "channel": "C1", "ts": "1503435956.000247"}"#)
            .create_async()
            .await;

        client(srv.url())
            .post_message(
                &SlackAccessToken::from("xoxp-caller"),
                &ChannelId("C1".to_owned()),
                "hi",
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let res = client(srv.url())
            .post_message(
                &SlackAccessToken::from("xoxp-caller"),
                &ChannelId("C404".to_owned()),
                "hi",
            )
            .await;

        mock.assert_async().await;
        assert!(matches!(res, Err(SlackError::Api(e)) if e == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", "/chat.postMessage")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let err = client(srv.url())
            .post_message(
                &SlackAccessToken::from("xoxp-caller"),
                &ChannelId("C1".to_owned()),
                "hi",
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Slack API responded with status 429 Too Many Requests"
        );
    }
}
