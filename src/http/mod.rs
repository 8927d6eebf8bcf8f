//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, single universal handler)
//!     → [routing layer decides target URL]
//!     → forward.rs (build outbound request, stream body, shared client)
//!     → relay.rs (status + headers, then streamed body)
//!     → Send to client
//! ```

pub mod forward;
pub mod relay;
pub mod server;

pub use forward::Forwarder;
pub use server::HttpServer;
