//! Command resolution: decide which positional argument is the script, which (if any) is
//! the requirements file, and which arguments belong to the script.

use crate::error::{PythenvError, Result};
use std::path::PathBuf;

pub const SCRIPT_EXTENSION: &str = ".py";
pub const REQUIREMENTS_EXTENSION: &str = ".txt";

/// Where the dependency declaration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementsSource {
    /// `# requirements:` comment inside the script
    Embedded,
    /// Explicit requirements file; comment parsing is skipped
    File(PathBuf),
}

/// A resolved `pythenv [requirements.txt] script.py [args...]` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub script: PathBuf,
    pub requirements: RequirementsSource,
    pub script_args: Vec<String>,
}

impl Invocation {
    pub fn resolve(args: &[String]) -> Result<Self> {
        let Some(first) = args.first() else {
            return Err(PythenvError::configuration(
                "You must pass script to run on command line",
            ));
        };

        if first.ends_with(SCRIPT_EXTENSION) {
            return Ok(Self {
                script: PathBuf::from(first),
                requirements: RequirementsSource::Embedded,
                script_args: args[1..].to_vec(),
            });
        }

        match args.get(1) {
            Some(second)
                if first.ends_with(REQUIREMENTS_EXTENSION) && second.ends_with(SCRIPT_EXTENSION) =>
            {
                Ok(Self {
                    script: PathBuf::from(second),
                    requirements: RequirementsSource::File(PathBuf::from(first)),
                    script_args: args[2..].to_vec(),
                })
            }
            _ => Err(PythenvError::configuration(format!(
                "Unrecognized arguments: expected a {} script, optionally preceded by a {} requirements file",
                SCRIPT_EXTENSION, REQUIREMENTS_EXTENSION
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_is_configuration_error() {
        let err = Invocation::resolve(&[]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_script_with_embedded_requirements() {
        let inv = Invocation::resolve(&args(&["script.py", "arg1", "arg2"])).unwrap();
        assert_eq!(inv.script, PathBuf::from("script.py"));
        assert_eq!(inv.requirements, RequirementsSource::Embedded);
        assert_eq!(inv.script_args, args(&["arg1", "arg2"]));
    }

    #[test]
    fn test_requirements_file_then_script() {
        let inv = Invocation::resolve(&args(&["reqs.txt", "script.py", "--flag", "x"])).unwrap();
        assert_eq!(inv.script, PathBuf::from("script.py"));
        assert_eq!(
            inv.requirements,
            RequirementsSource::File(PathBuf::from("reqs.txt"))
        );
        assert_eq!(inv.script_args, args(&["--flag", "x"]));
    }

    #[test]
    fn test_script_first_forwards_txt_argument() {
        let inv = Invocation::resolve(&args(&["script.py", "reqs.txt"])).unwrap();
        assert_eq!(inv.requirements, RequirementsSource::Embedded);
        assert_eq!(inv.script_args, args(&["reqs.txt"]));
    }

    #[test]
    fn test_lone_requirements_file_is_rejected() {
        let err = Invocation::resolve(&args(&["reqs.txt"])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_shapes_are_rejected() {
        let shapes: [&[&str]; 3] = [
            &["script.sh"],
            &["reqs.txt", "script.sh"],
            &["reqs.cfg", "script.py"],
        ];
        for shape in shapes {
            let err = Invocation::resolve(&args(shape)).unwrap_err();
            assert!(err.is_configuration(), "{:?} should be rejected", shape);
        }
    }
}
