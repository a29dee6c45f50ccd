//! Dependency declarations: the `# requirements:` comment embedded in a script,
//! or an external requirements file handed to the installer as-is.

use crate::error::{PythenvError, Result};
use regex::bytes::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::NamedTempFile;

/// Matches the first `# requirements: a, b==1.0` line of a script. Byte-oriented so that
/// scripts in legacy encodings (latin-1 and friends) still parse.
const REQUIREMENTS_PATTERN: &str = r"(?m-u)^#\s*requirements:\s+(.*?)$";

fn requirements_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REQUIREMENTS_PATTERN).expect("requirements regex is valid"))
}

/// Ordered list of dependency specifiers, e.g. `["requests", "six==1.12.0"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    specifiers: Vec<String>,
}

impl Requirements {
    /// Extract the embedded declaration from script source.
    ///
    /// Items are trimmed and empty items dropped; a declaration with no items left is
    /// rejected the same way as a missing one.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_bytes(source.as_bytes())
    }

    /// Same as [`Requirements::from_source`] over raw script bytes. Only the captured
    /// declaration is decoded (lossily); the rest of the script may be in any encoding.
    pub fn from_bytes(source: &[u8]) -> Result<Self> {
        let captures = requirements_regex().captures(source).ok_or_else(|| {
            PythenvError::configuration("Requirements not found in Python source file")
        })?;
        let raw = String::from_utf8_lossy(captures.get(1).map_or(&[][..], |m| m.as_bytes()));
        let specifiers: Vec<String> = raw
            .split(',')
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
        if specifiers.is_empty() {
            return Err(PythenvError::configuration(
                "Requirements declaration in Python source file is empty",
            ));
        }
        Ok(Self { specifiers })
    }

    /// Read a script and extract its embedded declaration.
    pub fn from_script(script: &Path) -> Result<Self> {
        let source = fs::read(script).map_err(|e| PythenvError::io("Read script", script, e))?;
        Self::from_bytes(&source)
    }

    pub fn specifiers(&self) -> &[String] {
        &self.specifiers
    }

    /// Installer file content: one specifier per line, no trailing newline.
    pub fn to_file_content(&self) -> String {
        self.specifiers.join("\n")
    }

    /// Write the declaration to a fresh `pythenv-requirements-*.txt` file under `dir`.
    /// The file is removed when the returned handle is dropped.
    pub fn materialize(&self, dir: &Path) -> Result<RequirementsFile> {
        let mut file = tempfile::Builder::new()
            .prefix("pythenv-requirements-")
            .suffix(".txt")
            .tempfile_in(dir)
            .map_err(|e| PythenvError::io("Create requirements file", dir, e))?;
        file.write_all(self.to_file_content().as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| PythenvError::io("Write requirements file", file.path(), e))?;
        tracing::debug!(
            "Wrote {} requirement(s) to {}",
            self.specifiers.len(),
            file.path().display()
        );
        Ok(RequirementsFile::Generated(file))
    }
}

/// A requirements file ready for `pip install -r`.
#[derive(Debug)]
pub enum RequirementsFile {
    /// Generated from an embedded comment; deleted on drop.
    Generated(NamedTempFile),
    /// Supplied by the caller; left untouched.
    Provided(PathBuf),
}

impl RequirementsFile {
    /// Validate a caller-supplied requirements file: it must exist and list at least one
    /// requirement line (blank lines and `#` comments do not count).
    pub fn provided(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PythenvError::configuration(format!(
                    "Requirements file not found: {}",
                    path.display()
                ))
            } else {
                PythenvError::io("Read requirements file", path, e)
            }
        })?;
        let has_entry = content
            .lines()
            .map(str::trim)
            .any(|l| !l.is_empty() && !l.starts_with('#'));
        if !has_entry {
            return Err(PythenvError::configuration(format!(
                "Requirements file is empty: {}",
                path.display()
            )));
        }
        Ok(Self::Provided(path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Generated(file) => file.path(),
            Self::Provided(path) => path,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}
