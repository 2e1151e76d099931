//! This module implements functionality to update records.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::fields::{Change, FieldError};
use super::{Record, RecordId, RecordService, TABLE, fetch_record};
use crate::database::UpdateQueryBuilder;
use crate::http::error::{AsErrorResponse, ErrorKind};

pub(crate) type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Updates the supplied fields of an existing record and returns the result.
	#[instrument(err(Debug, level = "debug"))]
	pub(crate) async fn update_record(&self, record_id: RecordId, request: Request) -> Result
	{
		let mut conn = self.mysql.acquire().await?;

		sqlx::query_scalar::<_, RecordId>(&format!("SELECT id FROM {TABLE} WHERE id = ?"))
			.bind(record_id)
			.fetch_optional(&mut *conn)
			.await?
			.ok_or(Error::RecordNotFound)?;

		let changes = Change::collect(&request.0)?;
		let fields = changes
			.iter()
			.map(|change| change.field.name())
			.collect::<Vec<_>>();

		let mut query = UpdateQueryBuilder::new(TABLE);

		for change in changes {
			change.push_into(&mut query);
		}

		if query.is_empty() {
			return Err(Error::NothingToUpdate);
		}

		query.push(" WHERE id = ").push_bind(record_id);
		query.build().execute(&mut *conn).await?;

		info!(target: "comp_general_api::audit_log", %record_id, ?fields, "updated record");

		fetch_record(record_id, &mut conn)
			.await?
			.ok_or(Error::RecordNotFound)
	}
}

/// Request for updating a record: a JSON object with any subset of the writable fields.
///
/// Keys that are not writable are ignored.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct Request(pub(crate) Map<String, JsonValue>);

/// Response for updating a record.
pub(crate) type Response = Record;

/// Errors that can occur when updating a record.
#[derive(Debug, Error)]
pub(crate) enum Error
{
	#[error("registro no encontrado")]
	RecordNotFound,

	#[error(transparent)]
	InvalidField(#[from] FieldError),

	#[error("no se proporcionaron campos para actualizar")]
	NothingToUpdate,

	#[error("{0}")]
	Database(#[from] sqlx::Error),
}

impl AsErrorResponse for Error
{
	fn error_kind(&self) -> ErrorKind
	{
		match self {
			Self::RecordNotFound => ErrorKind::NotFound,
			Self::InvalidField(_) | Self::NothingToUpdate => ErrorKind::Validation,
			Self::Database(_) => ErrorKind::Store,
		}
	}
}

impl_into_response!(Error);
