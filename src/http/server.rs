//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with the single proxy handler
//! - Wire up middleware (tracing)
//! - Bind server to listener, stop on shutdown signal
//! - Dispatch every request: match route → forward → relay

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::error::{ProxyError, ServerError};
use crate::http::forward::Forwarder;
use crate::http::relay::relay;
use crate::routing::{Resolution, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
    pub preserve_query: bool,
}

/// HTTP server for the reverse proxy.
pub struct HttpServer {
    router: Router,
    routes: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let routes = Arc::new(RouteTable::from_config(
            config.routes.clone(),
            config.fallback_target.clone(),
        ));
        let forwarder = Forwarder::new(&config.upstream)?;

        let state = AppState {
            routes: routes.clone(),
            forwarder,
            preserve_query: config.upstream.preserve_query,
        };

        let router = Self::build_router(state);
        Ok(Self { router, routes })
    }

    /// Every method on every path goes to the proxy handler.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The route table every request is matched against.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// Main proxy handler.
/// Looks up route, forwards request, relays the response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = Uuid::new_v4();
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();

    let mut target_url = match state.routes.resolve(path) {
        Resolution::Forward { target_url, matched } => {
            if !matched {
                tracing::debug!(request_id = %request_id, path = %path, "No route matched, using fallback");
            }
            target_url
        }
        Resolution::NotFound => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            return ProxyError::NoRouteMatched {
                path: path.to_string(),
            }
            .into_response();
        }
    };

    if state.preserve_query {
        if let Some(query) = parts.uri.query() {
            target_url.push('?');
            target_url.push_str(query);
        }
    }

    tracing::info!(
        request_id = %request_id,
        method = %parts.method,
        path = %path,
        target = %target_url,
        "Forwarding request to backend"
    );

    let response = match state
        .forwarder
        .forward(parts.method.clone(), &target_url, &parts.headers, body)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, target = %target_url, error = %e, "Forwarding failed");
            return e.into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        status = %response.status(),
        "Relaying backend response"
    );

    relay(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::routing::NoMatchPolicy;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn server(routes: Vec<RouteConfig>) -> HttpServer {
        let mut config = ProxyConfig::default();
        config.routes = routes;
        config.upstream.use_system_proxy = false;
        HttpServer::new(config).unwrap()
    }

    async fn send(server: &HttpServer, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = server.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn unmatched_path_is_not_found() {
        let server = server(vec![RouteConfig::new("/console", "http://localhost:5173")]);
        let (status, body) = send(&server, "/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "No matching route found");
    }

    #[tokio::test]
    async fn malformed_target_url_is_internal_error() {
        let server = server(vec![RouteConfig::new("/x/", "http://127.0.0.1:1")]);
        let (status, body) = send(&server, "/x/y").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to create request");
    }

    #[tokio::test]
    async fn refused_connection_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let server = server(vec![RouteConfig::new("", format!("http://{}", addr))]);
        let (status, body) = send(&server, "/anything").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, "Failed to reach backend server");
    }

    #[test]
    fn exposes_route_table() {
        let server = server(vec![RouteConfig::new("/a", "http://a")]);
        assert_eq!(server.routes().len(), 1);
        assert_eq!(server.routes().no_match_policy(), &NoMatchPolicy::NotFound);
    }
}
