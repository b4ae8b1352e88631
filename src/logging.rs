//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{
        HeaderMap, StatusCode,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body that is buffered for logging. Uploads are not
/// buffered and are limited by their route instead.
const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and
/// the full body is logged at the `debug` level. Uploaded files are passed
/// through without being read and are logged by their declared size.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let request = if is_multipart(&parts.headers) {
        log_request(&parts, &multipart_summary(&parts.headers));
        Request::from_parts(parts, body)
    } else {
        let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_LIMIT).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("could not read request body: {error}");
                return (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request body is too large or could not be read",
                )
                    .into_response();
            }
        };

        log_request(&parts, &String::from_utf8_lossy(&body_bytes));
        Request::from_parts(parts, Body::from(body_bytes))
    };

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"))
}

/// Describe a multipart body by its `Content-Length`.
fn multipart_summary(headers: &HeaderMap) -> String {
    match headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
    {
        Some(length) => format!("<multipart form, {length} bytes>"),
        None => "<multipart form, unknown size>".to_owned(),
    }
}

/// Cut `text` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a
/// character, or `None` if it already fits.
fn truncate(text: &str) -> Option<&str> {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let end = (0..=LOG_BODY_LENGTH_LIMIT)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    Some(&text[..end])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate(body) {
        Some(short_body) => {
            tracing::info!("Received request: {parts:#?}\nbody: {short_body}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate(body) {
        Some(short_body) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {short_body}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
