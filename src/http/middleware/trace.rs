use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request};
use axum::response::Response;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::request_id::RequestId;
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, HttpMakeClassifier, TraceLayer};

pub(crate) type Layer = TraceLayer<
	HttpMakeClassifier,
	fn(&Request) -> tracing::Span,
	DefaultOnRequest,
	fn(&Response, Duration, &tracing::Span),
	DefaultOnBodyChunk,
	DefaultOnEos,
	fn(ServerErrorsFailureClass, Duration, &tracing::Span),
>;

/// Opens a span for every request and records the response status and latency on it.
pub(crate) fn layer() -> Layer
{
	TraceLayer::new_for_http()
		.make_span_with(make_span as fn(&Request) -> tracing::Span)
		.on_response(on_response as fn(&Response, Duration, &tracing::Span))
		.on_failure(on_failure as fn(ServerErrorsFailureClass, Duration, &tracing::Span))
}

fn make_span(request: &Request) -> tracing::Span
{
	let span = info_span! {
		target: "comp_general_api::http",
		"request",
		request.id = tracing::field::Empty,
		request.peer_addr = tracing::field::Empty,
		request.method = %request.method(),
		request.uri = %request.uri(),
		response.status = tracing::field::Empty,
		latency = tracing::field::Empty,
	};

	if let Some(request_id) = request.extensions().get::<RequestId>() {
		span.record("request.id", tracing::field::debug(request_id.header_value()));
	}

	if let Some(ConnectInfo(peer_addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
		span.record("request.peer_addr", tracing::field::display(peer_addr));
	}

	span
}

fn on_response(response: &Response, latency: Duration, span: &tracing::Span)
{
	span.record("response.status", response.status().as_u16())
		.record("latency", tracing::field::debug(latency));

	info!(target: "comp_general_api::http", "finished processing request");
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
{
	match failure {
		ServerErrorsFailureClass::StatusCode(status) => {
			error!(
				target: "comp_general_api::http::error",
				status = status.as_u16(),
				?latency,
				"failed to handle request",
			);
		},
		ServerErrorsFailureClass::Error(error) => {
			error!(
				target: "comp_general_api::http::error",
				error,
				?latency,
				"failed to handle request",
			);
		},
	}
}
