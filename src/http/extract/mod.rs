//! Custom [extractors] producing our error envelope on rejection.
//!
//! [extractors]: axum::extract

mod json;
pub(crate) use json::Json;

mod path;
pub(crate) use path::Path;
