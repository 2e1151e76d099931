//! Types for modeling `comp_general` records.

use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::{Display, From};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use thiserror::Error;
use time::{Date, OffsetDateTime};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A record's ID, assigned by the database.
#[derive(
	Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub(crate) struct RecordId(i64);

impl FromStr for RecordId
{
	type Err = ParseIntError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		value.parse::<i64>().map(Self)
	}
}

/// A single row of the `comp_general` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub(crate) struct Record
{
	pub(crate) id: RecordId,

	/// When the record was created. Never changes afterwards.
	#[serde(with = "time::serde::rfc3339")]
	pub(crate) timestamp: OffsetDateTime,

	pub(crate) ruc: Ruc,

	/// Company name.
	pub(crate) nom_emp: String,

	/// Document date.
	#[serde(with = "iso_date")]
	pub(crate) fecha_doc: Date,

	/// Receipt / invoice number.
	pub(crate) boleta_factura: String,

	pub(crate) tipo_comprobante: String,
	pub(crate) descripcion: String,
	pub(crate) metodo_pago: String,
	pub(crate) monto_total: Decimal,
	pub(crate) monto_pagado: Decimal,
	pub(crate) monto_pendiente: Decimal,
	pub(crate) estado: String,

	/// Arbitrary JSON attached by clients.
	pub(crate) datos_extras: Option<Json<JsonValue>>,
}

/// A RUC (tax identifier): exactly 11 ASCII digits.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub(crate) struct Ruc(String);

#[derive(Debug, Error)]
#[error("el RUC debe tener exactamente {} dígitos", Ruc::LENGTH)]
pub(crate) struct InvalidRuc;

impl Ruc
{
	pub(crate) const LENGTH: usize = 11;
}

impl FromStr for Ruc
{
	type Err = InvalidRuc;

	/// Parses a RUC, ignoring surrounding whitespace.
	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let value = value.trim();

		if value.len() != Self::LENGTH || !value.bytes().all(|byte| byte.is_ascii_digit()) {
			return Err(InvalidRuc);
		}

		Ok(Self(value.to_owned()))
	}
}

#[cfg(test)]
mod tests
{
	use serde_json::json;
	use time::macros::{date, datetime};

	use super::*;
	use crate::testing;

	#[test]
	fn valid_rucs() -> testing::Result
	{
		assert_eq!("20123456789".parse::<Ruc>()?.to_string(), "20123456789");
		assert_eq!("  10987654321\n".parse::<Ruc>()?.to_string(), "10987654321");

		Ok(())
	}

	#[test]
	fn invalid_rucs()
	{
		for value in ["", "123", "1234567890A", "123456789012", "2012345678 9", "２0123456789"] {
			assert!(value.parse::<Ruc>().is_err(), "{value:?} should be rejected");
		}
	}

	#[test]
	fn serializes_record() -> testing::Result
	{
		let record = Record {
			id: RecordId::from(7),
			timestamp: datetime!(2024-03-15 14:30:00 UTC),
			ruc: "20123456789".parse()?,
			nom_emp: "ACME SAC".to_owned(),
			fecha_doc: date!(2024 - 03 - 01),
			boleta_factura: "F001-123".to_owned(),
			tipo_comprobante: "Factura".to_owned(),
			descripcion: String::new(),
			metodo_pago: "Transferencia".to_owned(),
			monto_total: Decimal::new(15050, 2),
			monto_pagado: Decimal::new(10000, 2),
			monto_pendiente: Decimal::new(5050, 2),
			estado: "Pendiente".to_owned(),
			datos_extras: Some(Json(json!({ "centro_costo": "A1" }))),
		};

		assert_eq!(serde_json::to_value(&record)?, json!({
			"id": 7,
			"timestamp": "2024-03-15T14:30:00Z",
			"ruc": "20123456789",
			"nom_emp": "ACME SAC",
			"fecha_doc": "2024-03-01",
			"boleta_factura": "F001-123",
			"tipo_comprobante": "Factura",
			"descripcion": "",
			"metodo_pago": "Transferencia",
			"monto_total": "150.50",
			"monto_pagado": "100.00",
			"monto_pendiente": "50.50",
			"estado": "Pendiente",
			"datos_extras": { "centro_costo": "A1" },
		}));

		Ok(())
	}
}
