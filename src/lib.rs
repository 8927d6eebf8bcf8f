//! Prefix-routing HTTP reverse proxy library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, ServerError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{match_route, ForwardingDecision, Route, RouteTable};
