use std::backtrace::Backtrace;
use std::panic;

/// Installs a panic hook that logs every panic, including a backtrace, before delegating to the
/// previously installed hook.
pub fn install()
{
	let old_hook = panic::take_hook();

	panic::set_hook(Box::new(move |panic_info| {
		let backtrace = Backtrace::force_capture();
		let location = panic_info.location();
		let message = panic_info
			.payload()
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str));

		error_span!("runtime::panic_hook").in_scope(|| {
			error!(
				target: "comp_general_api::audit_log",
				location = location.map(tracing::field::display),
				payload = message,
				%backtrace,
				"thread panicked",
			);
		});

		old_hook(panic_info)
	}));
}
