//! Verify that a request was signed with our Slack signing secret.
//!
//! Slack signs requests by computing an HMAC SHA256 over
//! `v0:{timestamp}:{body}`, keyed with the app's signing secret, and sending
//! the hex digest prefixed with `v0=` in `X-Slack-Signature`, alongside the
//! timestamp in `X-Slack-Request-Timestamp`. We recompute the signature and
//! compare. Requests outside a five minute window either side of our clock are
//! rejected to limit replays.
//!
//! <https://api.slack.com/authentication/verifying-requests-from-slack>

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum_extra::headers::{self, Header, HeaderMapExt};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::{
    iter,
    time::{SystemTime, UNIX_EPOCH},
};

type HmacSha256 = Hmac<Sha256>;

/// How far, in seconds, a request's timestamp may drift from our clock.
const REPLAY_WINDOW_SECS: u64 = 60 * 5;

/// The only signature version Slack currently issues.
const VERSION: &str = "v0";

static TIMESTAMP_HEADER: HeaderName = HeaderName::from_static("x-slack-request-timestamp");
static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-slack-signature");

/// Anything that can decide whether an inbound request is authentic.
pub trait RequestVerifier: Send + Sync {
    fn verify(&self, body: &[u8], headers: &HeaderMap) -> bool;
}

/// A newtype wrapper around the Slack signing secret.
#[derive(Debug)]
pub struct SigningSecret(pub SecretString);

impl From<String> for SigningSecret {
    fn from(x: String) -> Self {
        SigningSecret(SecretString::from(x))
    }
}

impl From<&str> for SigningSecret {
    fn from(x: &str) -> Self {
        Self::from(x.to_owned())
    }
}

impl RequestVerifier for SigningSecret {
    fn verify(&self, body: &[u8], headers: &HeaderMap) -> bool {
        match unix_now() {
            Some(now) => self.verify_at(body, headers, now),
            None => false,
        }
    }
}

impl SigningSecret {
    /// Verify a request against a fixed notion of "now", in Unix seconds.
    /// Requests which fail this predicate, or which lack either header, should
    /// be considered unauthenticated.
    pub fn verify_at(&self, body: &[u8], headers: &HeaderMap, now: i64) -> bool {
        let (Some(ts), Some(sig)) = (
            headers.typed_get::<SlackRequestTimestamp>(),
            headers.typed_get::<SlackSignature>(),
        ) else {
            return false;
        };

        if now.abs_diff(ts.secs) > REPLAY_WINDOW_SECS {
            return false;
        }

        self.mac(&ts.raw, body)
            .map(|mac| mac.verify_slice(&sig.0).is_ok())
            .unwrap_or(false)
    }

    /// Generate a valid signature with our secret for a timestamped payload.
    #[cfg(test)]
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> Option<SlackSignature> {
        self.mac(&timestamp.to_string(), body)
            .map(|mac| SlackSignature(mac.finalize().into_bytes().to_vec()))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(self.0.expose_secret().as_bytes())
            .map(|mut mac| {
                mac.update(VERSION.as_bytes());
                mac.update(b":");
                mac.update(timestamp.as_bytes());
                mac.update(b":");
                mac.update(body);
                mac
            })
            .ok()
    }
}

fn unix_now() -> Option<i64> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    i64::try_from(secs).ok()
}

/// The `X-Slack-Request-Timestamp` header.
///
/// The raw text is kept as it's what Slack signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackRequestTimestamp {
    raw: String,
    secs: i64,
}

#[cfg(test)]
impl From<i64> for SlackRequestTimestamp {
    fn from(secs: i64) -> Self {
        Self {
            raw: secs.to_string(),
            secs,
        }
    }
}

impl Header for SlackRequestTimestamp {
    fn name() -> &'static HeaderName {
        &TIMESTAMP_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let raw = values
            .next()
            .and_then(|v| v.to_str().ok())
            .ok_or_else(headers::Error::invalid)?;

        let secs = raw.parse().map_err(|_| headers::Error::invalid())?;

        Ok(Self {
            raw: raw.to_owned(),
            secs,
        })
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(v) = HeaderValue::from_str(&self.raw) {
            values.extend(iter::once(v));
        }
    }
}

/// The `X-Slack-Signature` header, holding the decoded digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackSignature(pub Vec<u8>);

impl Header for SlackSignature {
    fn name() -> &'static HeaderName {
        &SIGNATURE_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(VERSION))
            .and_then(|s| s.strip_prefix('='))
            .and_then(|digest| hex::decode(digest).ok())
            .map(SlackSignature)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        let s = format!("{}={}", VERSION, hex::encode(&self.0));

        if let Ok(v) = HeaderValue::from_str(&s) {
            values.extend(iter::once(v));
        }
    }
}
