//! This module contains the HTTP handlers for records.

use axum::extract::State;
use axum::{Router, routing};

use super::{Record, RecordId, RecordService, create_record, get_records, update_record};
use crate::http::error::AsErrorResponse;
use crate::http::extract::{Json, Path};
use crate::http::response::{Created, Listing, Updated};

/// Returns a router for the record endpoints.
pub(crate) fn router(record_service: RecordService) -> Router
{
	Router::new()
		.route("/registros", routing::get(get_records))
		.route("/crear", routing::post(create_record))
		.route("/modificar/{id}", routing::put(update_record))
		.with_state(record_service)
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn get_records(
	State(record_service): State<RecordService>,
) -> crate::http::Result<Listing<Record>>
{
	let records = record_service
		.get_records()
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Listing(records))
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn create_record(
	State(record_service): State<RecordService>,
	Json(request): Json<create_record::Request>,
) -> crate::http::Result<Created<create_record::Response>>
{
	let record = record_service
		.create_record(request)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Created { message: "Registro creado exitosamente", data: record })
}

#[instrument(level = "debug", err(Debug, level = "debug"))]
async fn update_record(
	State(record_service): State<RecordService>,
	Path(record_id): Path<RecordId>,
	Json(request): Json<update_record::Request>,
) -> crate::http::Result<Updated<update_record::Response>>
{
	let record = record_service
		.update_record(record_id, request)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Updated { message: "Registro actualizado exitosamente", data: record })
}
