//! Stand-in environment tool for lifecycle tests.
//!
//! The tool is a `sh` script that lays out `bin/pip` (copies the `-r` file to a record
//! outside the environment) and `bin/python` (runs the "script" with `sh`).

use pythenv_core::config::RunnerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) struct FakeToolchain {
    root: TempDir,
    tool: PathBuf,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    pub fn with_failing_installer() -> Self {
        Self::build(
            Some("echo 'ERROR: No matching distribution found for nope==0.0.0' >&2\nexit 1"),
            false,
        )
    }

    pub fn failing_tool() -> Self {
        Self::build(None, true)
    }

    fn build(pip_override: Option<&str>, tool_fails: bool) -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("tmp")).unwrap();
        let record = root.path().join("installed.txt");
        let pip_body = pip_override
            .map(String::from)
            .unwrap_or_else(|| format!("cp \"$3\" '{}'", record.display()));
        let body = if tool_fails {
            "echo 'virtualenv: cannot create environment' >&2\nexit 3\n".to_string()
        } else {
            format!(
                r#"set -e
mkdir -p "$1/bin"
cat > "$1/bin/pip" <<'PIP'
#!/bin/sh
{pip_body}
PIP
cat > "$1/bin/python" <<'PY'
#!/bin/sh
exec /bin/sh "$@"
PY
chmod +x "$1/bin/pip" "$1/bin/python"
"#
            )
        };
        let tool = root.path().join("fake-virtualenv.sh");
        fs::write(&tool, body).unwrap();
        Self { root, tool }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.root.path().join("tmp")
    }

    pub fn config(&self) -> RunnerConfig {
        RunnerConfig {
            venv_tool: format!("sh {}", self.tool.display()),
            tmp_dir: self.tmp_dir(),
            ..RunnerConfig::default()
        }
    }

    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    pub fn installed(&self) -> Option<String> {
        fs::read_to_string(self.root.path().join("installed.txt")).ok()
    }

    pub fn tmp_dir_is_empty(&self) -> bool {
        fs::read_dir(self.tmp_dir()).unwrap().next().is_none()
    }
}
