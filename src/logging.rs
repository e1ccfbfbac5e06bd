//! Request/response log settings and payload rendering.

use crate::redact::{redact, DEFAULT_SENSITIVE_KEYS};
use serde_json::Value;
use tracing::Level;

/// Emits a `tracing` event at a level chosen at runtime.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {{
        let level: ::tracing::Level = $level;
        if level == ::tracing::Level::ERROR {
            ::tracing::error!($($arg)+)
        } else if level == ::tracing::Level::WARN {
            ::tracing::warn!($($arg)+)
        } else if level == ::tracing::Level::INFO {
            ::tracing::info!($($arg)+)
        } else if level == ::tracing::Level::DEBUG {
            ::tracing::debug!($($arg)+)
        } else {
            ::tracing::trace!($($arg)+)
        }
    }};
}

pub(crate) use event_at;

/// Appended to payloads cut at the size limit.
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// How the request pipeline logs traffic.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level of the per-request "sending" and "received" events.
    pub level: Level,
    /// Whether request and response payloads are attached to those events.
    pub log_responses: bool,
    /// Maximum number of characters of a rendered payload.
    pub max_payload_chars: usize,
    /// Lowercase key fragments whose values are masked in logged payloads.
    pub sensitive_keys: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            log_responses: false,
            max_payload_chars: 4096,
            sensitive_keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

impl LogConfig {
    /// Renders a payload for a log line: redacted copy, compact JSON, truncated.
    pub fn render(&self, payload: &Value) -> String {
        let mut copy = payload.clone();
        redact(&mut copy, &self.sensitive_keys[..]);
        truncate(copy.to_string(), self.max_payload_chars)
    }

    /// Renders a raw response body, or `None` when payload logging is off.
    ///
    /// Bodies that are not JSON cannot be redacted, so only their length is
    /// reported.
    pub fn render_raw(&self, body: &str) -> Option<String> {
        if !self.log_responses {
            return None;
        }
        Some(match serde_json::from_str::<Value>(body) {
            Ok(value) => self.render(&value),
            Err(_) => format!("<{} bytes, not JSON>", body.len()),
        })
    }
}

/// Cuts `text` to at most `limit` characters, marking the cut.
pub fn truncate(mut text: String, limit: usize) -> String {
    if let Some((index, _)) = text.char_indices().nth(limit) {
        text.truncate(index);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}
