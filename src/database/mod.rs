//! Everything related to the MySQL connection pool.

use std::num::NonZero;
use std::thread;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use sqlx::pool::PoolOptions;

use crate::config::DatabaseConfig;

mod error_ext;
pub(crate) use error_ext::ErrorExt;

mod query;
pub(crate) use query::UpdateQueryBuilder;

pub(crate) type DB = sqlx::MySql;
pub type Pool = sqlx::MySqlPool;
pub(crate) type PoolConnection = sqlx::pool::PoolConnection<DB>;
pub(crate) type Error = sqlx::Error;

/// Used when the number of available CPUs cannot be determined.
const FALLBACK_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a free connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates a connection pool without connecting to the database yet.
///
/// Connections are opened on demand when a request calls [`Pool::acquire()`]; an unreachable
/// database therefore surfaces as an error on that request rather than at start-up.
pub(crate) fn connect_lazy(config: &DatabaseConfig) -> Pool
{
	let max_connections = config
		.max_connections
		.map(NonZero::get)
		.or_else(|| {
			thread::available_parallelism()
				.ok()
				.and_then(|count| u32::try_from(count.get()).ok())
		})
		.unwrap_or(FALLBACK_MAX_CONNECTIONS);

	debug!(max_connections, host = %config.host, database = %config.database, "creating pool");

	PoolOptions::<DB>::new()
		.max_connections(max_connections)
		.acquire_timeout(ACQUIRE_TIMEOUT)
		.connect_lazy_with(connect_options(config))
}

/// Translates our [`DatabaseConfig`] into connection options.
pub(crate) fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions
{
	let options = MySqlConnectOptions::new()
		.host(&config.host)
		.port(config.port)
		.username(&config.user)
		.password(&config.password)
		.database(&config.database);

	match config.ssl_ca.as_deref() {
		Some(ca) => options.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca(ca),
		None => options,
	}
}
