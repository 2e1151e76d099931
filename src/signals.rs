use std::error::Error;

use tokio::signal::ctrl_c;

/// Resolves once the OS asks us to shut down (SIGINT, or SIGTERM on unix).
pub(crate) async fn shutdown()
{
	tokio::select! {
		ctrl_c_result = ctrl_c() => match ctrl_c_result {
			Ok(()) => warn!("received SIGINT; shutting down"),
			Err(err) => {
				error!(error = &err as &dyn Error, "failed listening for SIGINT");
			},
		},

		() = terminate() => {},
	}
}

#[cfg(unix)]
async fn terminate()
{
	use tokio::signal::unix::{SignalKind, signal};

	match signal(SignalKind::terminate()) {
		Ok(mut signal) => match signal.recv().await {
			Some(()) => warn!("received SIGTERM; shutting down"),
			None => warn!("cannot receive more SIGTERM signals"),
		},
		Err(err) => {
			error!(error = &err as &dyn Error, "failed listening for SIGTERM");
		},
	}
}

#[cfg(not(unix))]
async fn terminate()
{
	std::future::pending().await
}
