//! Cross-origin policy.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build the CORS layer for the configured origins.
///
/// Credentials are allowed, so wildcards cannot be sent literally: methods,
/// headers and (for `*`) the origin are mirrored from the request instead.
/// Returns `None` when no usable origin is configured.
pub fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| match HeaderValue::from_str(s) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %s, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            return None;
        }
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    fn origins(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn app(layer: CorsLayer) -> Router {
        Router::new()
            .route("/api/generate-ai-story", post(|| async { "ok" }))
            .layer(layer)
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/generate-ai-story")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-trace-id")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let layer = cors_layer(&origins(&["http://localhost", "http://localhost:3000"])).unwrap();

        let response = app(layer)
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "content-type,x-trace-id"
        );
    }

    #[tokio::test]
    async fn test_preflight_from_unknown_origin_is_not_allowed() {
        let layer = cors_layer(&origins(&["http://localhost:3000"])).unwrap();

        let response = app(layer)
            .oneshot(preflight("https://evil.example"))
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_wildcard_mirrors_origin() {
        let layer = cors_layer(&origins(&["*"])).unwrap();

        let response = app(layer)
            .oneshot(preflight("https://forge.example"))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://forge.example"
        );
    }

    #[test]
    fn test_no_origins_disables_cors() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&origins(&["  "])).is_none());
    }
}
