//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout (pretty, compact or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID is a log field only; forwarded headers stay untouched
//! - No metrics endpoint

pub mod logging;

pub use logging::init_logging;
