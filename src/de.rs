//! Deserialisation helpers for Slack's `ok` discriminator.
//!
//! Slack responses are untagged, so each variant of
//! [APIResult][crate::slack::api::APIResult] pins the value of `ok` it accepts,
//! which makes serde fall through to the other variant on mismatch.

use serde::de::{Deserialize, Deserializer, Error};

fn exactly<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let found = bool::deserialize(deserializer)?;

    if found == expected {
        Ok(found)
    } else {
        Err(Error::custom(format!("expected `ok: {}`", expected)))
    }
}

pub fn ok_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, true)
}

pub fn ok_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, false)
}
