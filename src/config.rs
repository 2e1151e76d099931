//! Runtime configuration for the API.
//!
//! This module contains the [`Config`] struct - a set of configuration options that will be read
//! from the environment on startup. See the `.env.example` file in the root of the repository for
//! examples.
//!
//! Nothing outside this module reads the environment; the [`Config`] is built once and passed
//! down to whatever needs it.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZero;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// The API's runtime configuration.
#[derive(Debug, Clone)]
pub struct Config
{
	/// How to reach the database.
	pub database: DatabaseConfig,

	/// HTTP server configuration.
	pub http: HttpConfig,

	/// Where logs should go.
	pub logging: LoggingConfig,
}

/// Database connection parameters.
#[derive(Clone, derive_more::Debug)]
pub struct DatabaseConfig
{
	pub host: String,
	pub port: u16,
	pub user: String,

	#[debug("*****")]
	pub password: String,

	pub database: String,

	/// Path to a CA certificate. If this is set, connections are made over TLS and the server's
	/// certificate is verified against it.
	pub ssl_ca: Option<PathBuf>,

	/// Upper bound for the connection pool. Defaults to the number of available CPUs.
	pub max_connections: Option<NonZero<u32>>,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig
{
	/// The address the HTTP server is supposed to listen on.
	pub listen_on: SocketAddr,

	/// Cross-origin settings; [`None`] disables the CORS layer entirely.
	pub cors: Option<CorsConfig>,
}

/// CORS configuration.
#[derive(Debug, Clone, Default)]
pub struct CorsConfig
{
	/// Origins allowed to make cross-origin requests. Empty means "any origin".
	pub allowed_origins: Vec<http::HeaderValue>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig
{
	/// If set, logs are additionally written to daily-rotated files in this directory.
	pub directory: Option<PathBuf>,
}

/// Error that can occur while initializing the API's [`Config`].
#[derive(Debug, Error)]
pub enum InitializeConfigError
{
	/// A required environment variable was not set.
	#[error("missing required environment variable `{0}`")]
	Missing(&'static str),

	/// A required configuration option was empty.
	#[error("`{0}` cannot be empty")]
	EmptyValue(&'static str),

	/// A configuration option could not be parsed into the required type.
	#[error("failed to parse `{var}`: {source}")]
	Parse
	{
		var: &'static str,
		source: Box<dyn std::error::Error + Send + Sync + 'static>,
	},
}

impl Config
{
	/// Initializes a [`Config`] by reading and parsing environment variables.
	pub fn new() -> Result<Self, InitializeConfigError>
	{
		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Initializes a [`Config`] from an arbitrary variable source.
	///
	/// `lookup` is called with variable names such as `MYSQL_HOST` and should return their
	/// values, if any.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, InitializeConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let vars = Vars(lookup);

		let database = DatabaseConfig {
			host: vars.required("MYSQL_HOST")?,
			port: vars.optional("MYSQL_PORT")?.unwrap_or(3306),
			user: vars.required("MYSQL_USER")?,
			password: vars.optional("MYSQL_PASSWORD")?.unwrap_or_default(),
			database: vars.required("MYSQL_DATABASE")?,
			ssl_ca: vars.optional("MYSQL_SSL_CA")?,
			max_connections: vars.optional("MYSQL_MAX_CONNECTIONS")?,
		};

		let ip_addr = vars
			.optional::<IpAddr>("HOST")?
			.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

		let port = vars.optional::<u16>("PORT")?.unwrap_or(5000);

		let cors = if vars.optional::<Toggle>("CORS_ENABLED")?.is_none_or(|Toggle(on)| on) {
			let allowed_origins = vars
				.optional::<String>("CORS_ORIGINS")?
				.as_deref()
				.map(parse_origins)
				.transpose()
				.map_err(|source| InitializeConfigError::Parse {
					var: "CORS_ORIGINS",
					source: Box::new(source),
				})?
				.unwrap_or_default();

			Some(CorsConfig { allowed_origins })
		} else {
			None
		};

		let logging = LoggingConfig { directory: vars.optional("LOG_DIR")? };

		Ok(Self {
			database,
			http: HttpConfig { listen_on: SocketAddr::new(ip_addr, port), cors },
			logging,
		})
	}
}

struct Vars<F>(F);

impl<F> Vars<F>
where
	F: Fn(&'static str) -> Option<String>,
{
	/// Reads and parses a variable that must be set and non-empty.
	fn required<T>(&self, var: &'static str) -> Result<T, InitializeConfigError>
	where
		T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
	{
		let value = (self.0)(var).ok_or(InitializeConfigError::Missing(var))?;

		if value.trim().is_empty() {
			return Err(InitializeConfigError::EmptyValue(var));
		}

		parse(var, &value)
	}

	/// Reads and parses a variable.
	///
	/// Returns [`None`] if the variable does not exist or is empty.
	fn optional<T>(&self, var: &'static str) -> Result<Option<T>, InitializeConfigError>
	where
		T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
	{
		match (self.0)(var) {
			Some(value) if !value.trim().is_empty() => parse(var, &value).map(Some),
			Some(_) | None => Ok(None),
		}
	}
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, InitializeConfigError>
where
	T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
{
	value
		.trim()
		.parse::<T>()
		.map_err(|error| InitializeConfigError::Parse { var, source: Box::new(error) })
}

/// Parses a comma-separated list of origins.
///
/// An empty list means any origin is allowed. So does a `*` anywhere in the list.
fn parse_origins(value: &str) -> Result<Vec<http::HeaderValue>, http::header::InvalidHeaderValue>
{
	let origins = value
		.split(',')
		.map(str::trim)
		.filter(|origin| !origin.is_empty());

	if origins.clone().any(|origin| origin == "*") {
		return Ok(Vec::new());
	}

	origins.map(http::HeaderValue::from_str).collect()
}

/// A boolean flag as commonly written in environment files.
#[derive(Debug, Clone, Copy)]
struct Toggle(bool);

#[derive(Debug, Error)]
#[error("expected one of `true`, `false`, `1`, `0`, `yes`, `no`, `on`, `off`")]
struct InvalidToggle;

impl FromStr for Toggle
{
	type Err = InvalidToggle;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value.to_ascii_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Ok(Self(true)),
			"false" | "0" | "no" | "off" => Ok(Self(false)),
			_ => Err(InvalidToggle),
		}
	}
}
