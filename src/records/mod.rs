//! A service to manage `comp_general` records.

use derive_more::{Constructor, Debug};

use crate::database::{self, PoolConnection};

mod models;
pub(crate) use models::{Record, RecordId, Ruc};

pub(crate) mod fields;
pub(crate) mod get_records;
pub(crate) mod create_record;
pub(crate) mod update_record;
pub(crate) mod http;

/// The table all records live in.
const TABLE: &str = "comp_general";

/// Every column of [`TABLE`], in the order [`Record`] expects them.
const COLUMNS: &str = "id, `timestamp`, ruc, nom_emp, fecha_doc, boleta_factura, \
                       tipo_comprobante, descripcion, metodo_pago, monto_total, monto_pagado, \
                       monto_pendiente, estado, datos_extras";

/// A service to manage `comp_general` records.
#[derive(Debug, Clone, Constructor)]
pub(crate) struct RecordService
{
	#[debug("MySql")]
	mysql: database::Pool,
}

/// Fetches a single record by its ID on an already acquired connection.
async fn fetch_record(record_id: RecordId, conn: &mut PoolConnection) -> sqlx::Result<Option<Record>>
{
	sqlx::query_as::<_, Record>(&format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = ?"))
		.bind(record_id)
		.fetch_optional(&mut **conn)
		.await
}
