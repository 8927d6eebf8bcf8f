//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Root configuration for the reverse proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered route definitions. First match wins.
    pub routes: Vec<RouteConfig>,

    /// Target host for requests no route matches. Unset means 404.
    pub fallback_target: Option<String>,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single prefix route.
///
/// Field aliases accept the camelCase names used by JSON route files.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Literal path prefix to match (case-sensitive, byte-wise).
    #[serde(alias = "urlStartsWith")]
    pub path_prefix: String,

    /// Backend base URL including scheme, e.g. "http://localhost:5173".
    #[serde(alias = "redirectHost")]
    pub target_host: String,

    /// Remove the matched prefix before forwarding (default: true).
    #[serde(
        alias = "stripUrlPrefix",
        default = "default_strip_prefix",
        deserialize_with = "deserialize_strip_flag"
    )]
    pub strip_prefix: bool,
}

impl RouteConfig {
    pub fn new(path_prefix: impl Into<String>, target_host: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            target_host: target_host.into(),
            strip_prefix: true,
        }
    }
}

fn default_strip_prefix() -> bool {
    true
}

/// Route files carry the strip flag either as a bool or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StripFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_strip_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match StripFlag::deserialize(deserializer)? {
        StripFlag::Bool(b) => Ok(b),
        StripFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            other => Err(de::Error::custom(format!(
                "invalid strip prefix flag `{}`",
                other
            ))),
        },
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Total request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// Maximum redirects followed per request. 0 disables following.
    pub max_redirects: usize,

    /// Honour HTTP_PROXY / HTTPS_PROXY for outbound calls.
    pub use_system_proxy: bool,

    /// Append the inbound query string to the forwarded URL.
    pub preserve_query: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_redirects: 10,
            use_system_proxy: true,
            preserve_query: false,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{}`", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when RUST_LOG is not set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
