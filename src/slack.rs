//! Everything that talks to Slack: OAuth code exchange, posting messages, and
//! verifying that inbound requests were signed with our signing secret.
//!
//! Handlers depend on [platform::SlackPlatform] and
//! [signature::RequestVerifier] rather than the concrete types, so that they
//! can be exercised without a network.

pub mod api;
pub mod auth;
pub mod error;
pub mod message;
pub mod oauth;
pub mod platform;
pub mod router;
pub mod signature;
