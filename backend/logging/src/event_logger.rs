//! Service Event Logger
//!
//! One structured record per completed request stage, emitted on the
//! `service_events` target so it can be filtered into its own stream.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceEvent {
    Extracted {
        engine: String,
        blocks: usize,
        chars: usize,
        image_bytes: usize,
    },
    Formatted {
        chars_in: usize,
        chars_out: usize,
        fell_back: bool,
    },
    Synthesized {
        voice: String,
        segments: usize,
        samples: usize,
        sample_rate: u32,
    },
    Failed {
        route: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: ServiceEvent,
}

impl EventLogEntry {
    pub fn new(mut event: ServiceEvent) -> Self {
        if let ServiceEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a service event, redacting error text first.
    pub fn log_event(event: ServiceEvent) {
        let entry = EventLogEntry::new(event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "service_events", event = %json, "Service event"),
            Err(_) => info!(target: "service_events", event = ?entry, "Service event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_events_are_redacted() {
        let entry = EventLogEntry::new(ServiceEvent::Failed {
            route: "/extract".into(),
            error_msg: "GET /v1?key=secret failed".into(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "failed");
        assert_eq!(json["event"]["error_msg"], "GET /v1?key=[REDACTED_KEY] failed");
    }

    #[test]
    fn serializes_tagged_event() {
        let entry = EventLogEntry::new(ServiceEvent::Synthesized {
            voice: "af_heart".into(),
            segments: 2,
            samples: 48_000,
            sample_rate: 24_000,
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "synthesized");
        assert_eq!(json["event"]["segments"], 2);
        assert!(json["timestamp"].is_string());
    }
}
