//! This module implements functionality to create records.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::types::Json;
use thiserror::Error;
use time::{Date, OffsetDateTime};

use super::fields::{self, Field, FieldError};
use super::{Record, RecordId, RecordService, Ruc, TABLE, fetch_record};
use crate::database::ErrorExt;
use crate::http::error::{AsErrorResponse, ErrorKind};

pub(crate) type Result<T = Response, E = Error> = std::result::Result<T, E>;

/// The status records start out with.
pub(crate) const DEFAULT_ESTADO: &str = "Pendiente";

impl RecordService
{
	/// Creates a new record and returns it as stored.
	#[instrument(err(Debug, level = "debug"))]
	pub(crate) async fn create_record(&self, request: Request) -> Result
	{
		let new_record = NewRecord::try_from(request)?;
		let timestamp = OffsetDateTime::now_utc();

		let mut conn = self.mysql.acquire().await?;

		let result = sqlx::query(&format!(
			"INSERT INTO {TABLE} (
			   `timestamp`,
			   ruc,
			   nom_emp,
			   fecha_doc,
			   boleta_factura,
			   tipo_comprobante,
			   descripcion,
			   metodo_pago,
			   monto_total,
			   monto_pagado,
			   monto_pendiente,
			   estado,
			   datos_extras
			 )
			 VALUES
			   (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
		))
		.bind(timestamp)
		.bind(&new_record.ruc)
		.bind(&new_record.nom_emp)
		.bind(new_record.fecha_doc)
		.bind(&new_record.boleta_factura)
		.bind(&new_record.tipo_comprobante)
		.bind(&new_record.descripcion)
		.bind(&new_record.metodo_pago)
		.bind(new_record.monto_total)
		.bind(new_record.monto_pagado)
		.bind(new_record.monto_pendiente)
		.bind(&new_record.estado)
		.bind(new_record.datos_extras.as_ref().map(Json))
		.execute(&mut *conn)
		.await
		.map_err(|error| {
			if error.is_duplicate() {
				Error::Duplicate
			} else {
				Error::Database(error)
			}
		})?;

		let record_id = i64::try_from(result.last_insert_id())
			.map(RecordId::from)
			.map_err(|error| sqlx::Error::Decode(Box::new(error)))?;

		info!(
			target: "comp_general_api::audit_log",
			%record_id,
			ruc = %new_record.ruc,
			"created record",
		);

		fetch_record(record_id, &mut conn)
			.await?
			.ok_or(Error::Database(sqlx::Error::RowNotFound))
	}
}

/// Request for creating a record: a JSON object with the record's fields.
///
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct Request(pub(crate) Map<String, JsonValue>);

/// Response for creating a record.
pub(crate) type Response = Record;

/// A validated record, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewRecord
{
	pub(crate) ruc: Ruc,
	pub(crate) nom_emp: String,
	pub(crate) fecha_doc: Date,
	pub(crate) boleta_factura: String,
	pub(crate) tipo_comprobante: String,
	pub(crate) descripcion: String,
	pub(crate) metodo_pago: String,
	pub(crate) monto_total: Decimal,
	pub(crate) monto_pagado: Decimal,
	pub(crate) monto_pendiente: Decimal,
	pub(crate) estado: String,
	pub(crate) datos_extras: Option<JsonValue>,
}

impl TryFrom<Request> for NewRecord
{
	type Error = FieldError;

	fn try_from(Request(object): Request) -> std::result::Result<Self, Self::Error>
	{
		// `null` counts as "not supplied".
		let get = |field: Field| object.get(field.name()).filter(|value| !value.is_null());

		for field in Field::REQUIRED {
			let is_blank = get(field).is_none_or(|value| {
				fields::text_of(value).is_some_and(|text| text.is_empty())
			});

			if is_blank {
				return Err(FieldError::Missing(field));
			}
		}

		let required = |field: Field| get(field).ok_or(FieldError::Missing(field));
		let text = |field: Field| {
			get(field).map_or(Ok(String::new()), |value| fields::parse_text(field, value))
		};
		let amount = |field: Field| {
			get(field).map_or(Ok(Decimal::ZERO), |value| fields::parse_amount(field, value))
		};

		let ruc = fields::parse_ruc(Field::Ruc, required(Field::Ruc)?)?;
		let nom_emp = fields::parse_text(Field::NomEmp, required(Field::NomEmp)?)?;
		let fecha_doc = fields::parse_date(Field::FechaDoc, required(Field::FechaDoc)?)?;
		let boleta_factura =
			fields::parse_text(Field::BoletaFactura, required(Field::BoletaFactura)?)?;

		let estado = match text(Field::Estado)? {
			estado if estado.is_empty() => DEFAULT_ESTADO.to_owned(),
			estado => estado,
		};

		Ok(Self {
			ruc,
			nom_emp,
			fecha_doc,
			boleta_factura,
			tipo_comprobante: text(Field::TipoComprobante)?,
			descripcion: text(Field::Descripcion)?,
			metodo_pago: text(Field::MetodoPago)?,
			monto_total: amount(Field::MontoTotal)?,
			monto_pagado: amount(Field::MontoPagado)?,
			monto_pendiente: amount(Field::MontoPendiente)?,
			estado,
			datos_extras: get(Field::DatosExtras).cloned(),
		})
	}
}

/// Errors that can occur when creating a record.
#[derive(Debug, Error)]
pub(crate) enum Error
{
	#[error(transparent)]
	InvalidField(#[from] FieldError),

	#[error("ya existe un registro con los mismos datos")]
	Duplicate,

	#[error("{0}")]
	Database(#[from] sqlx::Error),
}

impl AsErrorResponse for Error
{
	fn error_kind(&self) -> ErrorKind
	{
		match self {
			Self::InvalidField(_) => ErrorKind::Validation,
			Self::Duplicate => ErrorKind::Conflict,
			Self::Database(_) => ErrorKind::Store,
		}
	}
}

impl_into_response!(Error);

#[cfg(test)]
mod tests
{
	use serde_json::json;
	use time::macros::date;

	use super::*;
	use crate::testing;

	fn request(value: JsonValue) -> Request
	{
		match value {
			JsonValue::Object(object) => Request(object),
			_ => panic!("not an object"),
		}
	}

	fn valid() -> JsonValue
	{
		json!({
			"ruc": " 20123456789 ",
			"nom_emp": "  ACME SAC ",
			"fecha_doc": "2024-03-01",
			"boleta_factura": "F001-123",
		})
	}

	#[test]
	fn minimal_record_gets_defaults() -> testing::Result
	{
		let record = NewRecord::try_from(request(valid()))?;

		assert_eq!(record, NewRecord {
			ruc: "20123456789".parse()?,
			nom_emp: "ACME SAC".to_owned(),
			fecha_doc: date!(2024 - 03 - 01),
			boleta_factura: "F001-123".to_owned(),
			tipo_comprobante: String::new(),
			descripcion: String::new(),
			metodo_pago: String::new(),
			monto_total: Decimal::ZERO,
			monto_pagado: Decimal::ZERO,
			monto_pendiente: Decimal::ZERO,
			estado: DEFAULT_ESTADO.to_owned(),
			datos_extras: None,
		});

		Ok(())
	}

	#[test]
	fn optional_fields_are_parsed() -> testing::Result
	{
		let mut body = valid();
		body["tipo_comprobante"] = json!(" Factura ");
		body["monto_total"] = json!(150.5);
		body["monto_pagado"] = json!("100.00");
		body["estado"] = json!("Pagado");
		body["datos_extras"] = json!({ "centro_costo": "A1" });
		body["unknown"] = json!("ignored");

		let record = NewRecord::try_from(request(body))?;

		assert_eq!(record.tipo_comprobante, "Factura");
		assert_eq!(record.monto_total, Decimal::new(1505, 1));
		assert_eq!(record.monto_pagado, Decimal::new(10000, 2));
		assert_eq!(record.monto_pendiente, Decimal::ZERO);
		assert_eq!(record.estado, "Pagado");
		assert_eq!(record.datos_extras, Some(json!({ "centro_costo": "A1" })));

		Ok(())
	}

	#[test]
	fn blank_estado_falls_back_to_default() -> testing::Result
	{
		let mut body = valid();
		body["estado"] = json!("   ");

		assert_eq!(NewRecord::try_from(request(body))?.estado, DEFAULT_ESTADO);

		Ok(())
	}

	#[test]
	fn missing_fields_are_named_in_order()
	{
		for field in Field::REQUIRED {
			for replacement in [None, Some(JsonValue::Null), Some(json!("   "))] {
				let mut body = valid();
				let object = body.as_object_mut().unwrap();

				match replacement {
					None => drop(object.remove(field.name())),
					Some(value) => drop(object.insert(field.name().to_owned(), value)),
				}

				assert!(matches!(
					NewRecord::try_from(request(body)),
					Err(FieldError::Missing(missing)) if missing == field
				));
			}
		}

		let error = NewRecord::try_from(request(json!({}))).unwrap_err();
		assert!(matches!(error, FieldError::Missing(Field::Ruc)));
	}

	#[test]
	fn missing_check_precedes_ruc_validation()
	{
		let error = NewRecord::try_from(request(json!({ "ruc": "123" }))).unwrap_err();

		assert!(matches!(error, FieldError::Missing(Field::NomEmp)));
	}

	#[test]
	fn invalid_ruc()
	{
		for ruc in ["123", "1234567890A"] {
			let mut body = valid();
			body["ruc"] = json!(ruc);

			assert!(matches!(NewRecord::try_from(request(body)), Err(FieldError::InvalidRuc(_))));
		}
	}

	#[test]
	fn invalid_date()
	{
		let mut body = valid();
		body["fecha_doc"] = json!("01/03/2024");

		assert!(matches!(
			NewRecord::try_from(request(body)),
			Err(FieldError::InvalidDate(Field::FechaDoc))
		));
	}

	#[test]
	fn invalid_amount()
	{
		let mut body = valid();
		body["monto_pendiente"] = json!("cincuenta");

		assert!(matches!(
			NewRecord::try_from(request(body)),
			Err(FieldError::InvalidAmount(Field::MontoPendiente))
		));
	}

	#[test]
	fn error_kinds()
	{
		assert_eq!(Error::from(FieldError::Missing(Field::Ruc)).error_kind(), ErrorKind::Validation);
		assert_eq!(Error::Duplicate.error_kind(), ErrorKind::Conflict);
		assert_eq!(Error::from(sqlx::Error::PoolTimedOut).error_kind(), ErrorKind::Store);
	}
}
