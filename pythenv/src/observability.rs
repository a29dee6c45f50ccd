//! Observability: tracing init and the JSONL audit log.
//!
//! Uses config::ObservabilityConfig for PYTHENV_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use pythenv_core::config::ObservabilityConfig;
use serde_json::{json, Value};
use tracing_subscriber::{prelude::*, EnvFilter};

static AUDIT_PATH: Mutex<Option<String>> = Mutex::new(None);

/// Initialize tracing. Call at process startup.
/// With `--quiet` or PYTHENV_QUIET=1 only WARN and above are logged. Logs go to stderr;
/// stdout belongs to the script.
pub fn init_tracing(quiet: bool) {
    let cfg = ObservabilityConfig::init(quiet);
    let level: String = if cfg.quiet {
        "pythenv=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()
    };
}

fn get_audit_path() -> Option<String> {
    {
        let guard = AUDIT_PATH.lock().ok()?;
        if let Some(ref p) = *guard {
            return Some(p.clone());
        }
    }
    let path = ObservabilityConfig::from_env().audit_log.clone()?;
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    {
        let mut guard = AUDIT_PATH.lock().ok()?;
        *guard = Some(path.clone());
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

fn audit(event: &str, fields: Value) {
    let Some(path) = get_audit_path() else {
        return;
    };
    let mut record = json!({
        "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "event": event,
        "pid": std::process::id(),
    });
    if let (Some(obj), Value::Object(extra)) = (record.as_object_mut(), fields) {
        obj.extend(extra);
    }
    append_jsonl(&path, &record);
}

/// Audit: run_started
pub fn audit_run_started(script: &Path, requirements: &str, args: &[String]) {
    audit(
        "run_started",
        json!({
            "script": script.display().to_string(),
            "requirements": requirements,
            "args": args,
        }),
    );
}

/// Audit: environment_created
pub fn audit_environment_created(env_dir: &Path) {
    audit(
        "environment_created",
        json!({ "env_dir": env_dir.display().to_string() }),
    );
}

/// Audit: dependencies_installed
pub fn audit_dependencies_installed(requirements_file: &Path, generated: bool) {
    audit(
        "dependencies_installed",
        json!({
            "requirements_file": requirements_file.display().to_string(),
            "generated": generated,
        }),
    );
}

/// Audit: script_finished
pub fn audit_script_finished(script: &Path, exit_code: i32) {
    audit(
        "script_finished",
        json!({
            "script": script.display().to_string(),
            "exit_code": exit_code,
        }),
    );
}

/// Audit: run_failed
pub fn audit_run_failed(error: &str, configuration: bool) {
    audit(
        "run_failed",
        json!({ "error": error, "configuration": configuration }),
    );
}
