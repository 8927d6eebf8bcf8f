//! Route matching logic.
//!
//! # Responsibilities
//! - Find the first route whose prefix matches the request path
//! - Compute the rewritten path
//!
//! # Design Decisions
//! - Path matching is a literal byte-wise, case-sensitive prefix test
//! - No segment boundaries: `/api` matches `/apiextra`
//! - Empty prefix = always matches (wildcard)
//! - Table order decides overlaps, not prefix length
//! - No regex to guarantee O(n) matching

use crate::routing::table::Route;

/// Outcome of matching one request path against the route table.
///
/// Borrows from both the table and the path; lives for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardingDecision<'a> {
    /// A route matched.
    Forward {
        prefix: &'a str,
        target_host: &'a str,
        rewritten_path: &'a str,
    },
    /// No route matched; the no-match policy applies.
    NoMatch,
}

impl<'a> ForwardingDecision<'a> {
    /// Target host concatenated with the rewritten path, verbatim.
    pub fn target_url(&self) -> Option<String> {
        match self {
            ForwardingDecision::Forward {
                target_host,
                rewritten_path,
                ..
            } => Some(format!("{}{}", target_host, rewritten_path)),
            ForwardingDecision::NoMatch => None,
        }
    }
}

/// Scan `routes` in order and return the first match for `path`.
pub fn match_route<'a>(routes: &'a [Route], path: &'a str) -> ForwardingDecision<'a> {
    for route in routes {
        if let Some(rest) = path.strip_prefix(route.prefix.as_str()) {
            let rewritten_path = if route.strip_prefix { rest } else { path };
            return ForwardingDecision::Forward {
                prefix: &route.prefix,
                target_host: &route.target_host,
                rewritten_path,
            };
        }
    }
    ForwardingDecision::NoMatch
}
