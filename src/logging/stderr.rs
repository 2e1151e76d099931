//! Tracing layer for logging to stderr.

use std::io::{self, IsTerminal};

use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;

/// Creates a tracing layer that will emit logs to stderr.
pub(crate) fn layer<S>() -> impl Layer<S>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	tracing_subscriber::fmt::layer()
		.with_ansi(io::stderr().is_terminal())
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::CLOSE)
		.with_target(true)
		.with_thread_ids(true)
		.with_writer(io::stderr)
}
