use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub(crate) fn args() -> Args
{
	Args::parse()
}

/// HTTP API for `comp_general` records.
#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Args
{
	/// What you want to do
	#[command(subcommand)]
	pub(crate) action: Option<Action>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Action
{
	/// Run the HTTP server
	Serve
	{
		/// Use a custom `.env` file.
		#[arg(long, name = "FILE", env = "COMP_GENERAL_ENV_FILE")]
		env_file: Option<PathBuf>,
	},
}

impl Default for Action
{
	fn default() -> Self
	{
		Self::Serve { env_file: None }
	}
}
