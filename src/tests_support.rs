//! Test doubles and helpers shared by the router tests.

use crate::{
    reply::Reply,
    slack::{
        auth::SlackAccessToken, error::SlackError, message::ChannelId,
        oauth::AuthorizationCode, platform::SlackPlatform,
    },
};
use async_trait::async_trait;
use axum::response::Response;
use secrecy::ExposeSecret;
use std::sync::{Arc, Mutex};

/// How a [FakeSlack] call should resolve.
#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    Ok,
    Status(u16),
    Api(&'static str),
    Transport,
}

impl Outcome {
    fn into_result(self) -> Result<(), SlackError> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Status(x) => Err(SlackError::Status(
                reqwest::StatusCode::from_u16(x).unwrap(),
            )),
            Outcome::Api(e) => Err(SlackError::Api(e.to_owned())),
            Outcome::Transport => Err(SlackError::Request(
                reqwest::Client::new().get("not a url").build().unwrap_err(),
            )),
        }
    }
}

#[derive(Default)]
pub struct Calls {
    codes: Vec<String>,
    posts: Vec<(String, String, String)>,
}

/// An in-memory [SlackPlatform] which records what it was asked to do.
/// Clones share their records. Successful exchanges always yield token `T`.
#[derive(Clone)]
pub struct FakeSlack {
    pub exchange: Outcome,
    pub post: Outcome,
    pub calls: Arc<Mutex<Calls>>,
}

impl Default for FakeSlack {
    fn default() -> Self {
        Self {
            exchange: Outcome::Ok,
            post: Outcome::Ok,
            calls: Arc::default(),
        }
    }
}

impl FakeSlack {
    pub fn codes(&self) -> Vec<String> {
        self.calls.lock().unwrap().codes.clone()
    }

    pub fn posts(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().posts.clone()
    }
}

#[async_trait]
impl SlackPlatform for FakeSlack {
    async fn exchange_token(
        &self,
        code: &AuthorizationCode,
    ) -> Result<SlackAccessToken, SlackError> {
        self.calls.lock().unwrap().codes.push(code.0.clone());

        self.exchange
            .into_result()
            .map(|_| SlackAccessToken::from("T"))
    }

    async fn post_message(
        &self,
        token: &SlackAccessToken,
        channel: &ChannelId,
        text: &str,
    ) -> Result<(), SlackError> {
        self.calls.lock().unwrap().posts.push((
            token.0.expose_secret().to_owned(),
            channel.0.clone(),
            text.to_owned(),
        ));

        self.post.into_result()
    }
}

async fn body_bytes(res: Response) -> Vec<u8> {
    axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn plaintext_body(res: Response) -> String {
    String::from_utf8(body_bytes(res).await).unwrap()
}

pub async fn json_body(res: Response) -> Reply {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}
