//! Outbound request construction and execution.
//!
//! # Responsibilities
//! - Build the backend request from method, target URL, headers, body
//! - Copy every inbound header entry, multi-value headers included
//! - Stream the inbound body without buffering
//! - Execute on one shared, pooled client
//!
//! # Design Decisions
//! - No header sanitization; only `Host` is left to the client, which
//!   derives it from the target URL
//! - No timeout unless one is configured
//! - No retries

use std::time::Duration;

use axum::body::{Body, HttpBody};
use axum::http::{header, HeaderMap, Method};
use reqwest::{redirect, Client, Url};

use crate::config::UpstreamConfig;
use crate::error::ProxyError;

/// Issues backend calls on a shared client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    /// Build the shared client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let redirects = if config.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(config.max_redirects)
        };

        let mut builder = Client::builder().redirect(redirects);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send one request to the backend.
    pub async fn forward(
        &self,
        method: Method,
        target_url: &str,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<reqwest::Response, ProxyError> {
        let request = build_request(method, target_url, headers, body)?;
        self.client
            .execute(request)
            .await
            .map_err(ProxyError::from_upstream)
    }
}

/// Build the outbound request without sending it.
pub fn build_request(
    method: Method,
    target_url: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<reqwest::Request, ProxyError> {
    let url = Url::parse(target_url).map_err(|e| ProxyError::RequestConstruction {
        target_url: target_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::RequestConstruction {
            target_url: target_url.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }

    let mut request = reqwest::Request::new(method, url);
    copy_request_headers(headers, request.headers_mut());

    // An exhausted body goes out as empty rather than as a zero-length chunked stream.
    if !body.is_end_stream() {
        *request.body_mut() = Some(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    Ok(request)
}

/// Append every entry of `src` to `dst`, skipping `Host`.
pub fn copy_request_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src.iter() {
        if name == header::HOST {
            continue;
        }
        dst.append(name.clone(), value.clone());
    }
}
