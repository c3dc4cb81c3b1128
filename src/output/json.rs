//! JSON output: `{ "data": ..., "meta": { "timestamp", "version" } }`

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::Result;

/// Borrowing envelope around a serialized payload
#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    data: &'a T,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    /// RFC 3339, UTC, second precision
    timestamp: String,
    version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Wrap `data` in the envelope and pretty-print it.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let envelope = Envelope {
        data,
        meta: Meta::now(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
