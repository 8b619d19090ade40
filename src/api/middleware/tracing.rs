//! Request tracing for the HTTP stack.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// One `request` span per call, with method, path and version.
///
/// Arrivals are logged at `DEBUG`, completions at `INFO` with status and
/// latency in milliseconds, and 5xx responses additionally at `ERROR`.
///
/// ```text
/// INFO request{method=POST uri=/urls version=HTTP/1.1}: finished processing request latency=4 ms status=201
/// INFO request{method=GET uri=/Ab3xYz version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// ```
///
/// Bodies and headers are never recorded, so passwords and bearer tokens
/// stay out of the logs.
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
