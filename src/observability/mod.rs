//! Observability subsystem.
//!
//! Structured logging via the tracing crate; the request ID from the HTTP
//! layer flows through all log events of a request.

pub mod logging;
