//! Response relay from backend to client.
//!
//! # Responsibilities
//! - Copy backend status and every header entry to the client response
//! - Stream the backend body without buffering it
//!
//! # Design Decisions
//! - Status and headers are fixed before the first body byte
//! - The backend response is owned by the body stream and dropped when the
//!   stream ends, fails, or the client disconnects
//! - A mid-body failure truncates the client connection; nothing is buffered
//!   to turn it into an error response

use axum::body::Body;
use axum::http::HeaderMap;
use axum::response::Response;
use futures_util::TryStreamExt;

/// Turn a backend response into the client response.
pub fn relay(response: reqwest::Response) -> Response {
    let status = response.status();
    let url = response.url().to_string();

    let mut client_response = Response::new(Body::empty());
    *client_response.status_mut() = status;
    copy_response_headers(response.headers(), client_response.headers_mut());

    let body = response.bytes_stream().inspect_err(move |e| {
        tracing::warn!(backend = %url, error = %e, "Backend body failed mid-stream");
    });
    *client_response.body_mut() = Body::from_stream(body);

    client_response
}

/// Append every entry of `src` to `dst`.
pub fn copy_response_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src.iter() {
        dst.append(name.clone(), value.clone());
    }
}
