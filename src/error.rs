//! Error types for request handling and server setup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-scoped failures. Each one ends the request; none are retried.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to build request for `{target_url}`: {reason}")]
    RequestConstruction { target_url: String, reason: String },

    #[error("backend unreachable: {0}")]
    BackendUnreachable(#[source] reqwest::Error),

    #[error("backend timed out: {0}")]
    BackendTimeout(#[source] reqwest::Error),

    #[error("no route matched `{path}`")]
    NoRouteMatched { path: String },
}

impl ProxyError {
    /// Classify an error returned by the upstream client.
    pub fn from_upstream(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::BackendTimeout(err)
        } else {
            ProxyError::BackendUnreachable(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::RequestConstruction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::BackendUnreachable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BackendTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::NoRouteMatched { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn client_message(&self) -> &'static str {
        match self {
            ProxyError::RequestConstruction { .. } => "Failed to create request",
            ProxyError::BackendUnreachable(_) => "Failed to reach backend server",
            ProxyError::BackendTimeout(_) => "Backend request timed out",
            ProxyError::NoRouteMatched { .. } => "No matching route found",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.client_message()).into_response()
    }
}

/// Failures while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let err = ProxyError::RequestConstruction {
            target_url: "http://x:1y".into(),
            reason: "invalid port number".into(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("http://x:1y"));

        let err = ProxyError::NoRouteMatched { path: "/nope".into() };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
