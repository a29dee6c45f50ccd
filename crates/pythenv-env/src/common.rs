//! Child process helpers shared by environment creation, installation and script runs.

use pythenv_core::{PythenvError, Result};
use std::process::{Command, ExitStatus};

use crate::signals::check_interrupted;

/// Exit code reported when the child was terminated by a signal: `128 + signo`, the shell
/// convention.
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// Exit code of a run aborted by Ctrl-C before the script started (`128 + SIGINT`).
pub const INTERRUPTED_EXIT_CODE: i32 = SIGNAL_EXIT_BASE + 2;

/// Render a command line for error messages and logs.
pub fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a collaborator to completion with stdout/stderr captured.
///
/// A spawn failure or a non-zero exit becomes `PythenvError::Execution` carrying the
/// trimmed stderr text. Ctrl-C seen while it ran wins over its status and becomes
/// `PythenvError::Interrupted`. Returns captured stdout on success.
pub fn run_checked(cmd: &mut Command) -> Result<String> {
    let command = display_command(cmd);
    tracing::debug!(command = %command, "Running collaborator");
    let out = cmd.output().map_err(|e| PythenvError::Execution {
        command: command.clone(),
        stderr: e.to_string(),
    })?;
    check_interrupted()?;
    if !out.status.success() {
        return Err(PythenvError::Execution {
            command,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// Map a finished child's status to the code this process should exit with.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return SIGNAL_EXIT_BASE + sig;
        }
    }
    1
}
