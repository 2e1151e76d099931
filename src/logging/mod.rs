use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

mod files;
mod stderr;

/// Installs the global tracing subscriber.
///
/// Logs always go to stderr; if [`LoggingConfig::directory`] is set, they are additionally
/// written to daily-rotated files in that directory. The returned guard flushes the file writer
/// when dropped and must be kept alive for as long as the process is running.
pub(crate) fn init(config: &LoggingConfig) -> io::Result<Option<WorkerGuard>>
{
	let stderr = stderr::layer();
	let (files, guard) = config
		.directory
		.as_deref()
		.map(files::layer)
		.transpose()?
		.unzip();

	tracing_subscriber::registry()
		.with(stderr.and_then(files).with_filter(env_filter()))
		.try_init()
		.map_err(io::Error::other)?;

	info!("initialized tracing");

	Ok(guard)
}

/// `RUST_LOG`, or `info` if it is not set.
fn env_filter() -> EnvFilter
{
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
