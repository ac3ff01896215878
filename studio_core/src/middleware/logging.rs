//! Request tracing for the HTTP server

use axum::{body::Body, Router};
use http::{Request, Response};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

/// Wraps every route in a `TraceLayer` span carrying method, path and user agent.
pub fn with_request_logging<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                let user_agent = request
                    .headers()
                    .get(http::header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    user_agent = %user_agent,
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                tracing::debug!("{} {}", request.method(), request.uri().path());
            })
            .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                let status = response.status();
                let latency_ms = latency.as_millis();

                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), latency_ms, "server error response");
                } else if status.is_client_error() {
                    tracing::warn!(status = status.as_u16(), latency_ms, "client error response");
                } else {
                    tracing::info!(status = status.as_u16(), latency_ms, "request completed");
                }
            })
            .on_failure(|error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(latency_ms = latency.as_millis(), error = ?error, "request failed");
            }),
    )
}
