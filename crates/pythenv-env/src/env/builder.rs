//! Build a throwaway virtualenv and resolve its interpreter / installer paths.

use pythenv_core::config::RunnerConfig;
use pythenv_core::{PythenvError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use crate::common::run_checked;
use crate::progress;

/// A freshly created, single-use environment.
///
/// The backing directory is owned from the moment it exists; dropping the handle removes it
/// recursively, whichever way the run ended.
#[derive(Debug)]
pub struct IsolatedEnv {
    dir: Option<TempDir>,
    path: PathBuf,
    interpreter: String,
    installer: String,
}

impl IsolatedEnv {
    /// Create a uniquely-named `pythenv-env-*` directory under `config.tmp_dir` and populate
    /// it with the environment tool (`<tool> <directory>`).
    pub fn create(config: &RunnerConfig) -> Result<Self> {
        progress!("Creating virtualenv...");
        let dir = tempfile::Builder::new()
            .prefix("pythenv-env-")
            .tempdir_in(&config.tmp_dir)
            .map_err(|e| PythenvError::io("Create environment dir", &config.tmp_dir, e))?;
        let env = Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
            interpreter: config.interpreter.clone(),
            installer: config.installer.clone(),
        };

        let argv = venv_tool_argv(config)?;
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]).arg(&env.path);
        run_checked(&mut cmd)?;

        tracing::debug!(env_dir = %env.path.display(), "Environment created");
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Interpreter inside the environment (`bin/python`, or `Scripts\python.exe`).
    pub fn interpreter(&self) -> PathBuf {
        resolve_executable(&self.path, &self.interpreter)
    }

    /// Installer inside the environment (`bin/pip`, or `Scripts\pip.exe`).
    pub fn installer(&self) -> PathBuf {
        resolve_executable(&self.path, &self.installer)
    }

    /// `<installer> install -r <requirements_file>`
    pub fn install(&self, requirements_file: &Path) -> Result<()> {
        progress!("Installing dependencies...");
        let mut cmd = Command::new(self.installer());
        cmd.arg("install").arg("-r").arg(requirements_file);
        let stdout = run_checked(&mut cmd)?;
        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim_end());
        }
        Ok(())
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        match dir.close() {
            Ok(()) => tracing::debug!(env_dir = %self.path.display(), "Environment removed"),
            Err(e) => tracing::warn!(
                "Failed to remove environment {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Program and leading arguments of the environment tool.
///
/// When the default `virtualenv` is not on PATH, fall back to `python3 -m venv`.
fn venv_tool_argv(config: &RunnerConfig) -> Result<Vec<OsString>> {
    let argv: Vec<OsString> = config.venv_tool_argv().into_iter().map(OsString::from).collect();
    if argv.is_empty() {
        return Err(PythenvError::configuration("Environment tool is empty"));
    }
    if config.uses_default_venv_tool() && which::which(&argv[0]).is_err() {
        let python = which_python()?;
        tracing::debug!(
            "{} not found in PATH, using {} -m venv",
            config.venv_tool,
            python.display()
        );
        return Ok(vec![python.into_os_string(), "-m".into(), "venv".into()]);
    }
    Ok(argv)
}

fn which_python() -> Result<PathBuf> {
    for name in ["python3", "python"] {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }
    Err(PythenvError::Execution {
        command: "virtualenv".to_string(),
        stderr: "virtualenv, python3 or python not found in PATH".to_string(),
    })
}

/// POSIX environments keep executables in `bin/`, Windows ones in `Scripts\*.exe`.
fn resolve_executable(env_dir: &Path, name: &str) -> PathBuf {
    let posix = env_dir.join("bin").join(name);
    if posix.exists() {
        return posix;
    }
    let scripts = env_dir.join("Scripts");
    let exe = scripts.join(format!("{name}.exe"));
    if exe.exists() {
        return exe;
    }
    if scripts.join(name).exists() {
        return scripts.join(name);
    }
    posix
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::FakeToolchain;
    use std::fs;

    #[test]
    fn test_create_lays_out_environment_and_removes_it_on_drop() {
        let fake = FakeToolchain::new();
        let env = IsolatedEnv::create(&fake.config()).unwrap();
        let path = env.path().to_path_buf();
        assert!(path.starts_with(fake.tmp_dir()));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("pythenv-env-"));
        assert_eq!(env.interpreter(), path.join("bin").join("python"));
        assert_eq!(env.installer(), path.join("bin").join("pip"));
        assert!(env.interpreter().exists());

        drop(env);
        assert!(!path.exists());
        assert!(fake.tmp_dir_is_empty());
    }

    #[test]
    fn test_each_environment_is_unique() {
        let fake = FakeToolchain::new();
        let a = IsolatedEnv::create(&fake.config()).unwrap();
        let b = IsolatedEnv::create(&fake.config()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_failed_tool_surfaces_stderr_and_cleans_up() {
        let fake = FakeToolchain::failing_tool();
        let err = IsolatedEnv::create(&fake.config()).unwrap_err();
        match err {
            PythenvError::Execution { command, stderr } => {
                assert!(command.contains("pythenv-env-"));
                assert_eq!(stderr, "virtualenv: cannot create environment");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fake.tmp_dir_is_empty());
    }

    #[test]
    fn test_install_passes_requirements_file_to_installer() {
        let fake = FakeToolchain::new();
        let reqs = fake.root().join("reqs.txt");
        fs::write(&reqs, "requests\nsix==1.12.0").unwrap();

        let env = IsolatedEnv::create(&fake.config()).unwrap();
        env.install(&reqs).unwrap();
        assert_eq!(fake.installed().unwrap(), "requests\nsix==1.12.0");
    }

    #[test]
    fn test_install_failure_surfaces_stderr_and_still_cleans_up() {
        let fake = FakeToolchain::with_failing_installer();
        let reqs = fake.root().join("reqs.txt");
        fs::write(&reqs, "nope==0.0.0").unwrap();

        let env = IsolatedEnv::create(&fake.config()).unwrap();
        let err = env.install(&reqs).unwrap_err();
        assert!(err.to_string().contains("No matching distribution found"));
        assert!(err.to_string().contains("install -r"));
        drop(env);
        assert!(fake.tmp_dir_is_empty());
    }

    #[test]
    fn test_missing_tmp_dir_is_io_error() {
        let fake = FakeToolchain::new();
        let mut config = fake.config();
        config.tmp_dir = fake.root().join("does-not-exist");
        let err = IsolatedEnv::create(&config).unwrap_err();
        assert!(matches!(err, PythenvError::Io { .. }));
    }

    #[test]
    fn test_empty_tool_is_configuration_error() {
        let fake = FakeToolchain::new();
        let mut config = fake.config();
        config.venv_tool = "   ".to_string();
        let err = IsolatedEnv::create(&config).unwrap_err();
        assert!(err.is_configuration());
        assert!(fake.tmp_dir_is_empty());
    }

    #[test]
    fn test_resolve_executable_prefers_bin_then_scripts() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_executable(tmp.path(), "python"),
            tmp.path().join("bin").join("python")
        );
        fs::create_dir_all(tmp.path().join("Scripts")).unwrap();
        fs::write(tmp.path().join("Scripts").join("python.exe"), "").unwrap();
        assert_eq!(
            resolve_executable(tmp.path(), "python"),
            tmp.path().join("Scripts").join("python.exe")
        );
    }
}
