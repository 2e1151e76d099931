//! Error responses.
//!
//! Every error that reaches the request boundary is turned into an [`ErrorResponse`], which is
//! serialized as `{"success": false, "error": "<message>"}`.

use std::borrow::Cow;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

/// The different kinds of errors the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind
{
	/// The request was malformed or failed validation.
	Validation,

	/// The requested resource does not exist.
	NotFound,

	/// The submitted resource conflicts with an existing one.
	Conflict,

	/// The database failed us.
	Store,

	/// Anything we did not anticipate (e.g. a panic).
	Unknown,
}

impl ErrorKind
{
	pub(crate) fn status(self) -> StatusCode
	{
		match self {
			Self::Validation => StatusCode::BAD_REQUEST,
			Self::NotFound => StatusCode::NOT_FOUND,
			Self::Conflict => StatusCode::CONFLICT,
			Self::Store | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

/// Errors that can be reported to clients.
pub(crate) trait AsErrorResponse: std::error::Error
{
	fn error_kind(&self) -> ErrorKind;

	/// The message included in the response body.
	fn message(&self) -> Cow<'static, str>
	{
		Cow::Owned(self.to_string())
	}

	fn as_error_response(&self) -> ErrorResponse
	{
		ErrorResponse { kind: self.error_kind(), message: self.message() }
	}
}

/// The `{success: false, error}` envelope.
#[derive(Debug, Clone)]
pub(crate) struct ErrorResponse
{
	kind: ErrorKind,
	message: Cow<'static, str>,
}

#[derive(Serialize)]
struct Body<'a>
{
	success: bool,
	error: &'a str,
}

impl ErrorResponse
{
	pub(crate) fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self
	{
		Self { kind, message: message.into() }
	}
}

impl IntoResponse for ErrorResponse
{
	fn into_response(self) -> Response
	{
		let status = self.kind.status();

		if status.is_server_error() {
			error!(kind = ?self.kind, %status, message = %self.message, "request failed");
		} else {
			debug!(kind = ?self.kind, %status, message = %self.message, "request rejected");
		}

		let body = Body { success: false, error: &self.message };

		(status, Json(body)).into_response()
	}
}
