use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Log every request and its outcome with a per-request id.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = sanitize_query(request.uri().query().unwrap_or(""));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %query,
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}

/// Hide sensitive values before they reach the logs. The oops query string is
/// free text, so only well-known key=value shapes are masked.
fn sanitize_query(query: &str) -> String {
    let mut result = query.to_string();
    for key in ["token", "password", "secret"] {
        let pattern = format!("{}=", key);
        if let Some(start) = result.find(&pattern) {
            let value_start = start + pattern.len();
            let value_end = result[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(value_start..value_end, "***");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query(""), "");
        assert_eq!(sanitize_query("hello%20world"), "hello%20world");
        assert_eq!(sanitize_query("token=abc123"), "token=***");
        assert_eq!(
            sanitize_query("userid=42&password=hunter2&x=1"),
            "userid=42&password=***&x=1"
        );
    }
}
