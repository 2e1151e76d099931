//! This module implements functionality to list records.

use thiserror::Error;

use super::{COLUMNS, Record, RecordService, TABLE};
use crate::http::error::{AsErrorResponse, ErrorKind};

pub(crate) type Result<T = Response, E = Error> = std::result::Result<T, E>;

impl RecordService
{
	/// Returns every record, in whatever order the database yields them.
	#[instrument(err(Debug, level = "debug"))]
	pub(crate) async fn get_records(&self) -> Result
	{
		let mut conn = self.mysql.acquire().await?;

		let records = sqlx::query_as::<_, Record>(&format!("SELECT {COLUMNS} FROM {TABLE}"))
			.fetch_all(&mut *conn)
			.await?;

		debug!(total = records.len(), "fetched records");

		Ok(records)
	}
}

/// Response for listing records.
pub(crate) type Response = Vec<Record>;

/// Errors that can occur when listing records.
#[derive(Debug, Error)]
pub(crate) enum Error
{
	#[error("{0}")]
	Database(#[from] sqlx::Error),
}

impl AsErrorResponse for Error
{
	fn error_kind(&self) -> ErrorKind
	{
		match self {
			Self::Database(_) => ErrorKind::Store,
		}
	}
}

impl_into_response!(Error);
