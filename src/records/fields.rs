//! The allow-list of writable fields, and parsing of client-supplied values for them.
//!
//! Requests arrive as loose JSON objects. Every value is validated against the kind of its
//! field before it gets anywhere near the database; column names only ever come from [`Field`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::models::{InvalidRuc, Ruc};
use crate::database::UpdateQueryBuilder;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A column clients are allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field
{
	Ruc,
	NomEmp,
	FechaDoc,
	BoletaFactura,
	TipoComprobante,
	Descripcion,
	MetodoPago,
	MontoTotal,
	MontoPagado,
	MontoPendiente,
	Estado,
	DatosExtras,
}

/// How a field's values are parsed and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind
{
	Ruc,
	Text,
	Date,
	Amount,
	Payload,
}

impl Field
{
	/// Every writable field, in column order.
	pub(crate) const ALL: [Self; 12] = [
		Self::Ruc,
		Self::NomEmp,
		Self::FechaDoc,
		Self::BoletaFactura,
		Self::TipoComprobante,
		Self::Descripcion,
		Self::MetodoPago,
		Self::MontoTotal,
		Self::MontoPagado,
		Self::MontoPendiente,
		Self::Estado,
		Self::DatosExtras,
	];

	/// Fields that must be supplied when creating a record, in the order they are checked.
	pub(crate) const REQUIRED: [Self; 4] = [Self::Ruc, Self::NomEmp, Self::FechaDoc, Self::BoletaFactura];

	/// The field's JSON key, which is also its column name.
	pub(crate) const fn name(self) -> &'static str
	{
		match self {
			Self::Ruc => "ruc",
			Self::NomEmp => "nom_emp",
			Self::FechaDoc => "fecha_doc",
			Self::BoletaFactura => "boleta_factura",
			Self::TipoComprobante => "tipo_comprobante",
			Self::Descripcion => "descripcion",
			Self::MetodoPago => "metodo_pago",
			Self::MontoTotal => "monto_total",
			Self::MontoPagado => "monto_pagado",
			Self::MontoPendiente => "monto_pendiente",
			Self::Estado => "estado",
			Self::DatosExtras => "datos_extras",
		}
	}

	const fn kind(self) -> Kind
	{
		match self {
			Self::Ruc => Kind::Ruc,
			Self::FechaDoc => Kind::Date,
			Self::MontoTotal | Self::MontoPagado | Self::MontoPendiente => Kind::Amount,
			Self::DatosExtras => Kind::Payload,
			Self::NomEmp
			| Self::BoletaFactura
			| Self::TipoComprobante
			| Self::Descripcion
			| Self::MetodoPago
			| Self::Estado => Kind::Text,
		}
	}
}

impl fmt::Display for Field
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.name())
	}
}

/// A client-supplied value failed validation.
#[derive(Debug, Error)]
pub(crate) enum FieldError
{
	#[error("falta el campo requerido: {0}")]
	Missing(Field),

	#[error(transparent)]
	InvalidRuc(#[from] InvalidRuc),

	#[error("el campo `{0}` debe ser una fecha con formato YYYY-MM-DD")]
	InvalidDate(Field),

	#[error("el campo `{0}` debe ser un monto numérico")]
	InvalidAmount(Field),

	#[error("el campo `{0}` debe ser texto")]
	NotText(Field),

	#[error("el campo `{0}` no puede ser nulo")]
	Null(Field),
}

/// A validated value for one field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue
{
	Ruc(Ruc),
	Text(String),
	Date(Date),
	Amount(Decimal),

	/// `None` clears the payload.
	Payload(Option<JsonValue>),
}

impl FieldValue
{
	/// Validates `value` according to `field`'s kind.
	///
	/// `null` is only accepted for [`Field::DatosExtras`].
	pub(crate) fn parse(field: Field, value: &JsonValue) -> Result<Self, FieldError>
	{
		match (field.kind(), value) {
			(Kind::Payload, JsonValue::Null) => Ok(Self::Payload(None)),
			(Kind::Payload, value) => Ok(Self::Payload(Some(value.clone()))),
			(_, JsonValue::Null) => Err(FieldError::Null(field)),
			(Kind::Ruc, value) => parse_ruc(field, value).map(Self::Ruc),
			(Kind::Text, value) => parse_text(field, value).map(Self::Text),
			(Kind::Date, value) => parse_date(field, value).map(Self::Date),
			(Kind::Amount, value) => parse_amount(field, value).map(Self::Amount),
		}
	}
}

/// A single `SET column = ?` of an update.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Change
{
	pub(crate) field: Field,
	pub(crate) value: FieldValue,
}

impl Change
{
	/// Collects all allow-listed fields present in `object`.
	///
	/// Keys that are not on the allow-list are ignored.
	pub(crate) fn collect(object: &serde_json::Map<String, JsonValue>) -> Result<Vec<Self>, FieldError>
	{
		Field::ALL
			.into_iter()
			.filter_map(|field| object.get(field.name()).map(|value| (field, value)))
			.map(|(field, value)| FieldValue::parse(field, value).map(|value| Self { field, value }))
			.collect()
	}

	/// Pushes `column = ?` into `query` and binds the value.
	pub(crate) fn push_into(self, query: &mut UpdateQueryBuilder<'_>)
	{
		let column = self.field.name();

		match self.value {
			FieldValue::Ruc(ruc) => query.set(column, ruc),
			FieldValue::Text(text) => query.set(column, text),
			FieldValue::Date(date) => query.set(column, date),
			FieldValue::Amount(amount) => query.set(column, amount),
			FieldValue::Payload(payload) => query.set(column, payload.map(Json)),
		};
	}
}

/// Returns the trimmed text of a string or number.
///
/// Numbers are accepted because clients routinely send identifiers such as invoice numbers
/// unquoted.
pub(crate) fn text_of(value: &JsonValue) -> Option<String>
{
	match value {
		JsonValue::String(text) => Some(text.trim().to_owned()),
		JsonValue::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

pub(crate) fn parse_text(field: Field, value: &JsonValue) -> Result<String, FieldError>
{
	text_of(value).ok_or(FieldError::NotText(field))
}

pub(crate) fn parse_ruc(field: Field, value: &JsonValue) -> Result<Ruc, FieldError>
{
	Ok(parse_text(field, value)?.parse::<Ruc>()?)
}

pub(crate) fn parse_date(field: Field, value: &JsonValue) -> Result<Date, FieldError>
{
	let JsonValue::String(text) = value else {
		return Err(FieldError::InvalidDate(field));
	};

	Date::parse(text.trim(), DATE_FORMAT).map_err(|_| FieldError::InvalidDate(field))
}

/// Parses a JSON number or a numeric string.
pub(crate) fn parse_amount(field: Field, value: &JsonValue) -> Result<Decimal, FieldError>
{
	let text = match value {
		JsonValue::Number(number) => number.to_string(),
		JsonValue::String(text) => text.trim().to_owned(),
		_ => return Err(FieldError::InvalidAmount(field)),
	};

	Decimal::from_str(&text)
		.or_else(|_| Decimal::from_scientific(&text))
		.map_err(|_| FieldError::InvalidAmount(field))
}
