//! Run the target script with the environment's interpreter.

use pythenv_core::{PythenvError, Result};
use std::path::Path;
use std::process::Command;

use crate::common::{display_command, exit_code};
use crate::env::builder::IsolatedEnv;
use crate::progress;
use crate::signals::check_interrupted;

/// `<env>/bin/python <script> <args...>` with inherited stdio.
///
/// Returns the script's exit code. A non-zero code is the script's business and is not an
/// error here; only failing to start the interpreter is. Ctrl-C received before the script
/// starts aborts with `Interrupted`; once it runs, the script decides what Ctrl-C means and
/// its exit code is returned as usual.
pub fn run_script(env: &IsolatedEnv, script: &Path, args: &[String]) -> Result<i32> {
    check_interrupted()?;
    progress!("Running script...");
    let mut cmd = Command::new(env.interpreter());
    cmd.arg(script).args(args);

    let mut child = cmd.spawn().map_err(|e| PythenvError::Execution {
        command: display_command(&cmd),
        stderr: e.to_string(),
    })?;
    let status = child
        .wait()
        .map_err(|e| PythenvError::io("Wait for script", script, e))?;

    let code = exit_code(&status);
    tracing::debug!(script = %script.display(), code, "Script finished");
    Ok(code)
}
