//! Utilities for unit tests.

use std::time::Duration;

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::pool::PoolOptions;

use crate::database::{DB, Pool};

pub(crate) type Error = anyhow::Error;
pub(crate) type Result<T = (), E = Error> = std::result::Result<T, E>;

/// A pool pointing at a port nothing listens on.
///
/// Acquiring a connection fails quickly, which is what tests of the validation and error paths
/// want.
pub(crate) fn lazy_pool() -> Pool
{
	let options = MySqlConnectOptions::new()
		.host("127.0.0.1")
		.port(1)
		.username("comp_general")
		.database("comp_general");

	PoolOptions::<DB>::new()
		.acquire_timeout(Duration::from_millis(250))
		.connect_lazy_with(options)
}

/// Builds a request with a JSON body.
pub(crate) fn json_request(method: http::Method, uri: &str, body: &JsonValue) -> http::Request<Body>
{
	http::Request::builder()
		.method(method)
		.uri(uri)
		.header(http::header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

/// Reads a response body as JSON.
pub(crate) async fn collect_json(response: Response) -> Result<JsonValue>
{
	let bytes = response.into_body().collect().await?.to_bytes();

	Ok(serde_json::from_slice(&bytes)?)
}
