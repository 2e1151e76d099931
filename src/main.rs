use color_eyre::eyre::{self, WrapErr};

mod cli;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	match cli::args().action.unwrap_or_default() {
		cli::Action::Serve { env_file } => {
			if let Some(path) = env_file.as_deref() {
				dotenvy::from_path(path)
					.wrap_err_with(|| format!("failed to load `{}`", path.display()))?;
			} else if dotenvy::dotenv().is_err() {
				// A missing `.env` file is fine (e.g. in containers), but it is worth a note.
				eprintln!("WARNING: no `.env` file found");
			}
		},
	}

	comp_general_api::panic_hook::install();

	let config = comp_general_api::Config::new().wrap_err("failed to load configuration")?;

	comp_general_api::run(config)
		.await
		.wrap_err("failed to run server")
}
