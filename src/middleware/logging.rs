//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Header carrying the generated request id back to the client
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Tags each request with an id and logs its outcome and duration. This is the
/// only place a server error response is logged.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        info!(
            "Request started: {} {} - Client: {}",
            method,
            uri,
            get_client_ip(&headers).unwrap_or_else(|| "unknown".to_string())
        );

        let mut response = next.run(request).await;

        let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        let status = response.status();

        if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, duration_ms);
        } else if status.is_server_error() {
            error!("Server error: {} - Duration: {:.2}ms", status, duration_ms);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, duration_ms);
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Get client IP address
fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    let ip_headers = ["x-forwarded-for", "x-real-ip", "x-client-ip"];

    for header_name in &ip_headers {
        if let Some(ip_str) = headers.get(*header_name).and_then(|v| v.to_str().ok()) {
            // X-Forwarded-For may contain multiple IPs, take the first one
            if let Some(first_ip) = ip_str.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() && ip != "unknown" {
                    return Some(ip.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_server_error_passes_through_once() {
        let app = Router::new()
            .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .layer(middleware::from_fn(request_logging_middleware));

        let request = axum::http::Request::builder()
            .uri("/fail")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers().get_all(REQUEST_ID_HEADER).iter().count(), 1);
    }

    #[test]
    fn test_get_client_ip() {
        let mut headers = HeaderMap::new();

        headers.insert("x-forwarded-for", "192.168.1.1, 10.0.0.1".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.1".to_string()));

        headers.clear();
        headers.insert("x-real-ip", "192.168.1.2".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.2".to_string()));

        headers.clear();
        headers.insert("x-forwarded-for", "unknown".parse().unwrap());
        assert_eq!(get_client_ip(&headers), None);

        headers.clear();
        assert_eq!(get_client_ip(&headers), None);
    }
}
