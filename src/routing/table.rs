//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Store routes in configuration order
//! - Look up the forwarding target for a request path
//! - Apply the no-match policy explicitly
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Explicit NoMatch rather than silent default

use crate::config::RouteConfig;
use crate::routing::matcher::{match_route, ForwardingDecision};

/// A compiled prefix route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub prefix: String,
    pub target_host: String,
    pub strip_prefix: bool,
}

impl Route {
    pub fn new(prefix: impl Into<String>, target_host: impl Into<String>, strip_prefix: bool) -> Self {
        Self {
            prefix: prefix.into(),
            target_host: target_host.into(),
            strip_prefix,
        }
    }
}

impl From<RouteConfig> for Route {
    fn from(config: RouteConfig) -> Self {
        Self {
            prefix: config.path_prefix,
            target_host: config.target_host,
            strip_prefix: config.strip_prefix,
        }
    }
}

/// What to do with a request no route matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoMatchPolicy {
    /// Answer 404.
    #[default]
    NotFound,
    /// Forward the unmodified path to this host.
    Fallback(String),
}

/// Where a request should go, after the no-match policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Forward to this absolute URL.
    Forward { target_url: String, matched: bool },
    /// Nothing to forward to.
    NotFound,
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    no_match: NoMatchPolicy,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, no_match: NoMatchPolicy) -> Self {
        Self { routes, no_match }
    }

    /// Build from configuration, preserving order.
    pub fn from_config(routes: Vec<RouteConfig>, fallback_target: Option<String>) -> Self {
        let routes: Vec<Route> = routes.into_iter().map(Route::from).collect();
        for (index, route) in routes.iter().enumerate() {
            tracing::debug!(
                index,
                prefix = %route.prefix,
                target_host = %route.target_host,
                strip_prefix = route.strip_prefix,
                "Route registered"
            );
        }
        let no_match = match fallback_target {
            Some(target) => NoMatchPolicy::Fallback(target),
            None => NoMatchPolicy::NotFound,
        };
        Self::new(routes, no_match)
    }

    pub fn no_match_policy(&self) -> &NoMatchPolicy {
        &self.no_match
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match `path` against the table. Pure.
    pub fn match_path<'a>(&'a self, path: &'a str) -> ForwardingDecision<'a> {
        match_route(&self.routes, path)
    }

    /// Match `path` and apply the no-match policy.
    pub fn resolve(&self, path: &str) -> Resolution {
        let decision = self.match_path(path);
        if let Some(target_url) = decision.target_url() {
            return Resolution::Forward {
                target_url,
                matched: true,
            };
        }
        match &self.no_match {
            NoMatchPolicy::Fallback(target) => Resolution::Forward {
                target_url: format!("{}{}", target, path),
                matched: false,
            },
            NoMatchPolicy::NotFound => Resolution::NotFound,
        }
    }
}
