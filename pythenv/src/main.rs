mod cli;
mod observability;
mod run;

use clap::{CommandFactory, Parser};
use cli::Cli;
use pythenv_core::PythenvError;
use pythenv_env::common::INTERRUPTED_EXIT_CODE;

/// Exit status for usage, configuration and provisioning failures.
const FAILURE_EXIT_CODE: i32 = 1;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { FAILURE_EXIT_CODE } else { 0 });
        }
    };
    observability::init_tracing(cli.quiet);
    if let Err(e) = pythenv_env::install_interrupt_handler() {
        tracing::warn!("Ctrl-C will not clean up temporary files: {}", e);
    }

    let code = match run::execute(&cli) {
        Ok(code) => code,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}

/// Configuration errors go to stdout with the usage text; everything else to stderr.
fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PythenvError>() {
        Some(config_err) if config_err.is_configuration() => {
            observability::audit_run_failed(&config_err.to_string(), true);
            println!("{}", config_err);
            println!("{}", Cli::command().render_help());
            FAILURE_EXIT_CODE
        }
        Some(interrupted) if interrupted.is_interrupted() => {
            observability::audit_run_failed(&interrupted.to_string(), false);
            eprintln!("{}", interrupted);
            INTERRUPTED_EXIT_CODE
        }
        _ => {
            observability::audit_run_failed(&format!("{:#}", err), false);
            eprintln!("Error: {:#}", err);
            FAILURE_EXIT_CODE
        }
    }
}
