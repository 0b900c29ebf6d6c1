//! Observability
//!
//! Structured JSON logging only. Logging is synchronous, read-only with
//! respect to request handling, and a logging failure never fails the
//! operation being logged.

mod logger;

pub use logger::{Logger, Severity};
