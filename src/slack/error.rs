use thiserror::Error;

/// Everything that can go wrong talking to Slack.
#[derive(Debug, Error)]
pub enum SlackError {
    /// The request never produced a readable response: DNS, connection
    /// resets, or a body that wasn't the JSON we expected.
    #[error("Slack API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Slack answered with a non-2xx HTTP status.
    #[error("Slack API responded with status {0}")]
    Status(reqwest::StatusCode),

    /// Slack answered `"ok": false`. Holds Slack's error code verbatim, for
    /// example `channel_not_found`.
    #[error("{0}")]
    Api(String),
}
