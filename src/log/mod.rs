//! Provenance logging for import sessions.

pub mod provenance;

pub use provenance::{ImportLog, LogEntry};
