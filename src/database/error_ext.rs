/// Extension trait for SQL errors.
pub(crate) trait ErrorExt
{
	/// Checks if the error was caused by a `UNIQUE` / PK constraint failure.
	fn is_duplicate(&self) -> bool;
}

impl ErrorExt for super::Error
{
	fn is_duplicate(&self) -> bool
	{
		self.as_database_error()
			.is_some_and(|error| error.is_unique_violation())
	}
}
