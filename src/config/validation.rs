//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every target host is an absolute http(s) URL
//! - Validate the bind address (IP literal or `host:port`)
//! - Detect shadowed routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Shadowed routes are reported, not rejected (earlier entries win)

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, RouteConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route {index}: target host `{target}` is not a valid URL: {reason}")]
    InvalidTargetHost {
        index: usize,
        target: String,
        reason: String,
    },

    #[error("route {index}: unsupported scheme `{scheme}` (expected http or https)")]
    UnsupportedScheme { index: usize, scheme: String },

    #[error("fallback target `{target}` is invalid: {reason}")]
    InvalidFallback { target: String, reason: String },

    #[error("bind address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (index, route) in config.routes.iter().enumerate() {
        match check_target(&route.target_host) {
            Ok(()) => {}
            Err(TargetProblem::Parse(reason)) => errors.push(ValidationError::InvalidTargetHost {
                index,
                target: route.target_host.clone(),
                reason,
            }),
            Err(TargetProblem::Scheme(scheme)) => {
                errors.push(ValidationError::UnsupportedScheme { index, scheme })
            }
        }
    }

    if let Some(target) = &config.fallback_target {
        if let Err(problem) = check_target(target) {
            let reason = match problem {
                TargetProblem::Parse(reason) => reason,
                TargetProblem::Scheme(scheme) => format!("unsupported scheme `{}`", scheme),
            };
            errors.push(ValidationError::InvalidFallback {
                target: target.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An IP socket address, or `host:port` with a non-empty host name.
/// Names are not resolved here; binding reports unresolvable ones.
fn is_bind_address(addr: &str) -> bool {
    if addr.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(|c: char| c.is_whitespace() || c == ':' || c == '/')
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

enum TargetProblem {
    Parse(String),
    Scheme(String),
}

fn check_target(target: &str) -> Result<(), TargetProblem> {
    let url = Url::parse(target).map_err(|e| TargetProblem::Parse(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TargetProblem::Scheme(other.to_string())),
    }
}

/// Pairs `(earlier, later)` where route `later` can never match because
/// `earlier` comes first and its prefix is a prefix of `later`'s.
pub fn shadowed_routes(routes: &[RouteConfig]) -> Vec<(usize, usize)> {
    let mut shadowed = Vec::new();
    for (later, route) in routes.iter().enumerate() {
        if let Some(earlier) = routes[..later]
            .iter()
            .position(|r| route.path_prefix.starts_with(&r.path_prefix))
        {
            shadowed.push((earlier, later));
        }
    }
    shadowed
}
