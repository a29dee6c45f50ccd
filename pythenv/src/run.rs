//! The run pipeline: resolve → declare → create → install → run.
//!
//! Every temporary resource is a guard local to `execute`, so it is released before the
//! caller turns the returned code into the process exit status.

use anyhow::{Context, Result};
use pythenv_core::config::RunnerConfig;
use pythenv_core::invocation::{Invocation, RequirementsSource};
use pythenv_core::requirements::{Requirements, RequirementsFile};
use pythenv_core::PythenvError;
use pythenv_env::{run_script, IsolatedEnv};

use crate::cli::Cli;
use crate::observability;

/// Run the invocation described by `cli` and return the script's exit code.
pub fn execute(cli: &Cli) -> Result<i32> {
    let invocation = Invocation::resolve(&cli.args)?;
    tracing::debug!(?invocation, "Resolved invocation");
    let config = RunnerConfig::from_env().with_cli_overrides(cli.venv_tool.clone(), cli.tmp_dir.clone());
    run(&invocation, &config)
}

pub fn run(invocation: &Invocation, config: &RunnerConfig) -> Result<i32> {
    if !invocation.script.is_file() {
        return Err(PythenvError::configuration(format!(
            "Script not found: {}",
            invocation.script.display()
        ))
        .into());
    }

    let requirements = match &invocation.requirements {
        RequirementsSource::Embedded => Requirements::from_script(&invocation.script)?
            .materialize(&config.tmp_dir)?,
        RequirementsSource::File(path) => RequirementsFile::provided(path)?,
    };
    observability::audit_run_started(
        &invocation.script,
        &requirements.path().display().to_string(),
        &invocation.script_args,
    );

    let env = IsolatedEnv::create(config).context("Failed to create virtualenv")?;
    observability::audit_environment_created(env.path());

    env.install(requirements.path())
        .context("Failed to install dependencies")?;
    observability::audit_dependencies_installed(requirements.path(), requirements.is_generated());

    let code = run_script(&env, &invocation.script, &invocation.script_args)?;
    observability::audit_script_finished(&invocation.script, code);
    Ok(code)
}
