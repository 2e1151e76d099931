use std::any::Any;

use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::error::{ErrorKind, ErrorResponse};

pub(crate) fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

/// Turns panics inside handlers into a generic 500 response.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanicHandler;

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = axum::body::Body;

	fn response_for_panic(
		&mut self,
		error: Box<dyn Any + Send + 'static>,
	) -> http::Response<Self::ResponseBody>
	{
		let error = error
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| error.downcast_ref::<String>().map(String::as_str));

		error!(?error, "http handler panicked");

		ErrorResponse::new(ErrorKind::Unknown, "ocurrió un error inesperado").into_response()
	}
}
