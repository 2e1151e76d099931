//! Helpers for dealing with SQL queries.

use std::fmt;
use std::ops::{Deref, DerefMut};

use sqlx::QueryBuilder;

use super::DB;

/// A wrapper around [`sqlx::QueryBuilder`] that allows easily building an
/// `UPDATE` query.
///
/// Column names are pushed verbatim, so they must never come from user input; values are
/// always bound as parameters.
pub(crate) struct UpdateQueryBuilder<'args>
{
	/// The underlying query builder.
	query: QueryBuilder<'args, DB>,

	/// How many columns we pushed into `SET`.
	columns: usize,
}

impl<'args> UpdateQueryBuilder<'args>
{
	/// Creates a new [`UpdateQueryBuilder`].
	pub(crate) fn new(table: impl fmt::Display) -> Self
	{
		Self { query: QueryBuilder::new(format!("UPDATE {table}")), columns: 0 }
	}

	/// Adds an update into the query.
	///
	/// # Example
	///
	/// ```rust,ignore
	/// let mut query = UpdateQueryBuilder::new("table");
	///
	/// if condition1 {
	///     query.set("foo", bar);
	/// }
	///
	/// if condition2 {
	///     query.set("baz", 69);
	/// }
	///
	/// query.push(" WHERE id = ").push_bind(id);
	/// let result = query.build().execute(&mut *conn).await?;
	/// ```
	pub(crate) fn set<V>(&mut self, column: impl fmt::Display, value: V) -> &mut Self
	where
		V: sqlx::Type<DB> + sqlx::Encode<'args, DB> + Send + 'args,
	{
		self.query
			.push(if self.columns == 0 { " SET " } else { ", " })
			.push(column)
			.push(" = ")
			.push_bind(value);

		self.columns += 1;
		self
	}

	/// Whether no column has been [`set()`] yet.
	///
	/// [`set()`]: UpdateQueryBuilder::set
	pub(crate) fn is_empty(&self) -> bool
	{
		self.columns == 0
	}
}

impl fmt::Debug for UpdateQueryBuilder<'_>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("UpdateQueryBuilder")
			.field("sql", &self.query.sql())
			.finish()
	}
}

impl<'args> Deref for UpdateQueryBuilder<'args>
{
	type Target = QueryBuilder<'args, DB>;

	fn deref(&self) -> &Self::Target
	{
		&self.query
	}
}

impl DerefMut for UpdateQueryBuilder<'_>
{
	fn deref_mut(&mut self) -> &mut Self::Target
	{
		&mut self.query
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn builds_update_statement()
	{
		let mut query = UpdateQueryBuilder::new("comp_general");

		assert!(query.is_empty());

		query.set("estado", "Pagado").set("descripcion", "pago parcial");
		query.push(" WHERE id = ").push_bind(7_i64);

		assert!(!query.is_empty());
		assert_eq!(
			query.sql(),
			"UPDATE comp_general SET estado = ?, descripcion = ? WHERE id = ?"
		);
	}
}
