//! Progress lines of the run pipeline ("Creating virtualenv...", "Installing dependencies...",
//! "Running script...").
//!
//! They are `info` events under the `pythenv::progress` target and are dropped entirely in
//! quiet mode (`--quiet` / PYTHENV_QUIET); warnings and errors are never silenced here.

use pythenv_core::config::ObservabilityConfig;
use std::fmt;

#[macro_export]
macro_rules! progress {
    ($($arg:tt)*) => {
        $crate::log::emit(format_args!($($arg)*))
    };
}

pub fn emit(line: fmt::Arguments<'_>) {
    if ObservabilityConfig::from_env().quiet {
        return;
    }
    tracing::info!(target: "pythenv::progress", "{}", line);
}
