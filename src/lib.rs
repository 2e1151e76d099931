//! The `comp_general` record API.
//!
//! This crate implements a small HTTP service for listing, creating and updating invoice/payment
//! records stored in a single MySQL table. [`run()`] is the main entry point; [`app()`] returns
//! the bare [`axum::Router`] so it can be driven directly (e.g. in tests).

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

#[macro_use]
extern crate tracing as _;

#[cfg(test)]
mod testing;

#[macro_use]
mod macros;

mod database;
mod http;
mod logging;
mod signals;

pub mod config;
pub use config::Config;

pub mod panic_hook;

mod records;

pub use database::Pool;

/// Runs the HTTP server until it receives SIGINT.
pub async fn run(config: Config) -> Result<(), RunError>
{
	let logging_guard = logging::init(&config.logging).map_err(RunError::Logging)?;
	let pool = database::connect_lazy(&config.database);

	let service = app(pool.clone(), &config.http)
		.into_make_service_with_connect_info::<SocketAddr>();

	let tcp_listener = tokio::net::TcpListener::bind(config.http.listen_on).await?;
	let addr = tcp_listener.local_addr()?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(signals::shutdown())
		.await?;

	warn!("closing database connections");
	pool.close().await;

	drop(logging_guard);

	Ok(())
}

/// Builds the API's router on top of the given connection pool.
///
/// No connection is opened here; every request acquires its own connection from `pool` and
/// returns it once the request has been handled.
pub fn app(pool: Pool, http_config: &config::HttpConfig) -> axum::Router
{
	let record_service = records::RecordService::new(pool);

	http::router(record_service, http_config.cors.as_ref())
}

/// Errors returned by [`run()`].
#[derive(Debug, Error)]
pub enum RunError
{
	/// We failed to set up logging.
	#[error("failed to initialize logging: {0}")]
	Logging(io::Error),

	/// Some I/O failure, e.g. binding the TCP listener.
	#[error(transparent)]
	Io(#[from] io::Error),
}
