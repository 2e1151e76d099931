/// Implements [`IntoResponse`] for a type implementing [`AsErrorResponse`], so it can be returned
/// from handlers and extractors directly.
///
/// [`IntoResponse`]: axum::response::IntoResponse
/// [`AsErrorResponse`]: crate::http::error::AsErrorResponse
macro_rules! impl_into_response {
	($ty:ty) => {
		impl ::axum::response::IntoResponse for $ty
		{
			fn into_response(self) -> ::axum::response::Response
			{
				$crate::http::error::AsErrorResponse::as_error_response(&self).into_response()
			}
		}
	};
}
