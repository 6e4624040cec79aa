//! The seam between our handlers and Slack itself.

use super::{
    api::SlackClient,
    auth::SlackAccessToken,
    error::SlackError,
    message::ChannelId,
    oauth::AuthorizationCode,
};
use async_trait::async_trait;

/// The two Slack operations the relay performs. [SlackClient] talks to the real
/// API; tests substitute their own implementation.
#[async_trait]
pub trait SlackPlatform: Send + Sync {
    async fn exchange_token(&self, code: &AuthorizationCode)
        -> Result<SlackAccessToken, SlackError>;

    async fn post_message(
        &self,
        token: &SlackAccessToken,
        channel: &ChannelId,
        text: &str,
    ) -> Result<(), SlackError>;
}

#[async_trait]
impl SlackPlatform for SlackClient {
    async fn exchange_token(
        &self,
        code: &AuthorizationCode,
    ) -> Result<SlackAccessToken, SlackError> {
        self.exchange_code(code).await
    }

    async fn post_message(
        &self,
        token: &SlackAccessToken,
        channel: &ChannelId,
        text: &str,
    ) -> Result<(), SlackError> {
        SlackClient::post_message(self, token, channel, text).await
    }
}
