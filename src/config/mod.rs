//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, or legacy JSON route list)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed by value to HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table lives for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError, ConfigFormat, ConfigOverrides};
pub use schema::{ListenerConfig, LogFormat, LoggingConfig, ProxyConfig, RouteConfig, UpstreamConfig};
