//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (route lookup, no-match policy)
//!     → matcher.rs (first prefix match, path rewrite)
//!     → Return: ForwardingDecision or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Keep configuration order
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by position, not specificity)

pub mod matcher;
pub mod table;

pub use matcher::{match_route, ForwardingDecision};
pub use table::{NoMatchPolicy, Resolution, Route, RouteTable};
