use clap::Parser;
use std::path::PathBuf;

/// pythenv - run a Python script in a throwaway virtualenv
///
/// Dependencies come from a `# requirements: a, b==1.0` comment in the script, or from a
/// requirements file given before the script. The environment is removed after the run and
/// the script's exit code is returned.
#[derive(Parser, Debug)]
#[command(name = "pythenv")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "pythenv [OPTIONS] [requirements.txt] <script.py> [args...]")]
pub struct Cli {
    /// Environment tool command line, e.g. "python3 -m venv" (default: from env or virtualenv)
    #[arg(long, value_name = "CMD")]
    pub venv_tool: Option<String>,

    /// Directory for the temporary environment and requirements file (default: from env or system temp dir)
    #[arg(long, value_name = "DIR")]
    pub tmp_dir: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// [requirements.txt] script.py [args...]
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
