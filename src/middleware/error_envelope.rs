use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::envelope::Envelope;

/// Largest framework error body copied into the envelope's `error` field.
const MAX_DETAIL_BYTES: usize = 4096;

/// Middleware that wraps non-JSON error responses (413 from the body limit,
/// 405 from the router) in the failure envelope. Status and headers are kept.
pub async fn wrap_framework_errors(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let reason = status.canonical_reason().unwrap_or("Request failed");
    let detail = to_bytes(body, MAX_DETAIL_BYTES)
        .await
        .ok()
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| reason.to_string());

    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);

    let mut wrapped = (status, Envelope::failure(reason, detail)).into_response();
    wrapped.headers_mut().extend(parts.headers);
    wrapped
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}
