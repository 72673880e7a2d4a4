//! HTTP access logging middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates the access log layer for all routes.
///
/// Every request gets an `INFO` span with method, URI and HTTP version; the
/// response is logged at `INFO` with its status and latency in milliseconds.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/gh version=HTTP/1.1}: finished processing request latency=0 ms status=302
/// INFO request{method=POST uri=/gh version=HTTP/1.1}: finished processing request latency=2 ms status=201
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
