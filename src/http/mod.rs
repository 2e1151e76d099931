//! The HTTP surface of the API.

use axum::Router;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use serde_json::json;

use crate::config::CorsConfig;
use crate::records::{self, RecordService};

pub(crate) mod error;
pub(crate) mod extract;
pub(crate) mod middleware;
pub(crate) mod response;

pub(crate) type Result<T, E = error::ErrorResponse> = std::result::Result<T, E>;

/// Builds the full router: all routes, the JSON 404 fallback and the middleware stack.
///
/// If `cors` is [`None`], no CORS headers are emitted at all.
pub(crate) fn router(record_service: RecordService, cors: Option<&CorsConfig>) -> Router
{
	let router = Router::new()
		.merge(records::http::router(record_service))
		.route("/health", get(health))
		.fallback(fallback)
		.layer(middleware::catch_panic::layer())
		.layer(middleware::trace::layer())
		.layer(middleware::request_id::propagate_layer())
		.layer(middleware::request_id::set_layer());

	match cors {
		Some(config) => router.layer(middleware::cors::layer(config)),
		None => router,
	}
}

async fn health() -> impl IntoResponse
{
	Json(json!({ "success": true, "status": "ok" }))
}

async fn fallback() -> error::ErrorResponse
{
	error::ErrorResponse::new(error::ErrorKind::NotFound, "ruta no encontrada")
}
