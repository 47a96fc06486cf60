//! Structured logging for Pagecast.
//!
//! Console and rolling NDJSON file output, secret redaction, and service event records.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, ServiceEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
