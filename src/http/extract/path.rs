use std::borrow::Cow;

use axum::extract::FromRequestParts;
use thiserror::Error;

use crate::http::error::{AsErrorResponse, ErrorKind};

mod base
{
	pub(crate) use axum::extract::Path as Extractor;
	pub(crate) use axum::extract::path::ErrorKind;
	pub(crate) use axum::extract::rejection::PathRejection as Rejection;
}

/// An [extractor] for path parameters.
///
/// This is the same as [`axum::extract::Path`], except that it produces the same kind of error
/// response as all of our errors.
///
/// [extractor]: axum::extract
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Extractor), rejection(PathRejection))]
pub(crate) struct Path<T>(pub(crate) T);

/// Rejection for the [`Path`] extractor.
#[derive(Debug, Error)]
#[error(transparent)]
pub(crate) struct PathRejection(#[from] base::Rejection);

impl AsErrorResponse for PathRejection
{
	fn error_kind(&self) -> ErrorKind
	{
		ErrorKind::Validation
	}

	fn message(&self) -> Cow<'static, str>
	{
		let base::Rejection::FailedToDeserializePathParams(source) = &self.0 else {
			return Cow::Owned(self.0.body_text());
		};

		match source.kind() {
			base::ErrorKind::ParseErrorAtKey { key, value, .. } => {
				Cow::Owned(format!("parámetro `{key}` inválido: `{value}`"))
			},
			base::ErrorKind::ParseError { value, .. }
			| base::ErrorKind::ParseErrorAtIndex { value, .. } => {
				Cow::Owned(format!("parámetro de ruta inválido: `{value}`"))
			},
			_ => Cow::Owned(source.body_text()),
		}
	}
}

impl_into_response!(PathRejection);
