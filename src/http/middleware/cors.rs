use http::Method;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Builds the CORS layer.
///
/// If no origins are configured, requests from any origin are allowed.
pub(crate) fn layer(config: &CorsConfig) -> CorsLayer
{
	let allow_origin = if config.allowed_origins.is_empty() {
		AllowOrigin::any()
	} else {
		AllowOrigin::list(config.allowed_origins.iter().cloned())
	};

	CorsLayer::new()
		.allow_origin(allow_origin)
		.allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::PUT, Method::OPTIONS]))
		.allow_headers(AllowHeaders::mirror_request())
}
