//! Custom [response] types
//!
//! All of them wrap their payload in a `{"success": true, ...}` envelope.
//!
//! [response]: axum::response::IntoResponse

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

/// A list of items: `{success, data, total}` with status 200.
#[derive(Debug)]
pub(crate) struct Listing<T>(pub(crate) Vec<T>);

impl<T: Serialize> IntoResponse for Listing<T>
{
	fn into_response(self) -> Response
	{
		#[derive(Serialize)]
		struct Body<T>
		{
			success: bool,
			total: usize,
			data: Vec<T>,
		}

		Json(Body { success: true, total: self.0.len(), data: self.0 }).into_response()
	}
}

/// A newly created resource: `{success, message, data}` with status 201.
#[derive(Debug)]
pub(crate) struct Created<T>
{
	pub(crate) message: &'static str,
	pub(crate) data: T,
}

impl<T: Serialize> IntoResponse for Created<T>
{
	fn into_response(self) -> Response
	{
		(StatusCode::CREATED, Json(Envelope::new(self.message, self.data))).into_response()
	}
}

/// A modified resource: `{success, message, data}` with status 200.
#[derive(Debug)]
pub(crate) struct Updated<T>
{
	pub(crate) message: &'static str,
	pub(crate) data: T,
}

impl<T: Serialize> IntoResponse for Updated<T>
{
	fn into_response(self) -> Response
	{
		Json(Envelope::new(self.message, self.data)).into_response()
	}
}

#[derive(Serialize)]
struct Envelope<T>
{
	success: bool,
	message: &'static str,
	data: T,
}

impl<T> Envelope<T>
{
	fn new(message: &'static str, data: T) -> Self
	{
		Self { success: true, message, data }
	}
}
