/// Installs a hook that reports a panic together with the process name and exits with code 1.
///
/// Meant for host binaries. The hook runs on the coroutine's own stack when a coroutine panics
/// and exits the process there, before [`Scheduler::resume`](crate::Scheduler::resume) can raise
/// the panic again in the caller. Without the hook installed, the panic reaches the caller.
pub fn set_panic_hook(process_name: String) {
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("\nPanic in process: {process_name}");
        if let Some(location) = panic_info.location() {
            eprintln!("panic occurred in file '{}' at line {}", location.file(), location.line());
        } else {
            eprintln!("panic occurred but can't get location information...");
        }
        if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
            eprintln!("with message: {payload}");
        } else if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
            eprintln!("with message: {payload}");
        }

        std::process::exit(1);
    }));
}
