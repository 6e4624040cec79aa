//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/`
//! - GET: `/slack/oauth/callback`
//! - POST: `/post_message`

use crate::{
    config::Config,
    relay::post_message_handler,
    slack::{
        api::SlackClient, platform::SlackPlatform, router::slack_router,
        signature::RequestVerifier,
    },
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

pub const GREETING: &str = "Hello, Slack Bot!";

/// Dependencies shared by routes across requests. Nothing in here is mutable.
#[derive(Clone)]
pub struct Deps {
    pub slack: Arc<dyn SlackPlatform>,
    pub verifier: Arc<dyn RequestVerifier>,
}

impl Deps {
    /// Wire up the real Slack client and signature verification.
    pub fn from_config(config: Config) -> Self {
        Deps {
            slack: Arc::new(SlackClient::new(config.api_base, config.credentials)),
            verifier: Arc::new(config.signing_secret),
        }
    }
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/slack", slack_router())
        .route("/post_message", post(post_message_handler))
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/", get(|| async { GREETING }))
        .with_state(deps)
}
