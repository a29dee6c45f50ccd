//! Ctrl-C handling for the whole run.
//!
//! A catching handler (not `SIG_IGN`) is installed once at startup, so collaborators and the
//! script still get default SIGINT behaviour after `exec`. The runner itself never dies from
//! SIGINT: it records the interrupt, waits for the current child, and unwinds through `?` so
//! every environment and requirements-file guard is dropped.

use pythenv_core::{PythenvError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the SIGINT handler. Safe to call more than once; only the first call registers.
pub fn install_interrupt_handler() -> Result<()> {
    static INSTALLED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    INSTALLED
        .get_or_init(|| {
            ctrlc::set_handler(|| {
                INTERRUPTED.store(true, Ordering::SeqCst);
            })
            .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(|e| PythenvError::Execution {
            command: "install Ctrl-C handler".to_string(),
            stderr: e,
        })
}

/// Whether SIGINT was received since the handler was installed.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Abort the pipeline with `PythenvError::Interrupted` once Ctrl-C was seen.
pub fn check_interrupted() -> Result<()> {
    if interrupted() {
        tracing::debug!("Interrupted, unwinding");
        return Err(PythenvError::Interrupted);
    }
    Ok(())
}
