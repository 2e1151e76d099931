use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::http::error::{AsErrorResponse, ErrorKind};

/// An [extractor] for JSON request bodies.
///
/// This is the same as [`axum::Json`], except that it produces the same kind of error response as
/// all of our errors.
///
/// [extractor]: axum::extract
#[derive(Debug)]
pub(crate) struct Json<T>(pub(crate) T);

impl<S, T> FromRequest<S> for Json<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = JsonRejection;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		if !has_json_content_type(req.headers()) {
			return Err(JsonRejection::MissingContentType);
		}

		let bytes = Bytes::from_request(req, state).await?;
		let parsed = serde_json::from_slice(&bytes)?;

		Ok(Self(parsed))
	}
}

/// Rejection for the [`Json`] extractor.
#[derive(Debug, Error)]
pub(crate) enum JsonRejection
{
	#[error("se requiere la cabecera `Content-Type: application/json`")]
	MissingContentType,

	#[error("no se pudo leer el cuerpo de la solicitud")]
	ReadRequestBody(#[from] BytesRejection),

	#[error("JSON inválido: {0}")]
	Deserialize(#[from] serde_json::Error),
}

impl AsErrorResponse for JsonRejection
{
	fn error_kind(&self) -> ErrorKind
	{
		ErrorKind::Validation
	}
}

impl_into_response!(JsonRejection);

/// Checks if the given `headers` contain a JSON-like Content-Type.
fn has_json_content_type(headers: &http::HeaderMap) -> bool
{
	let Some(content_type) = headers.get(http::header::CONTENT_TYPE) else {
		return false;
	};

	let Ok(content_type) = content_type.to_str() else {
		return false;
	};

	let Ok(mime) = content_type.parse::<mime::Mime>() else {
		return false;
	};

	mime.type_() == "application"
		&& (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}
