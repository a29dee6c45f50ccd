//! 按领域分组的配置结构体
//!
//! 从环境变量加载，统一 fallback 逻辑。

use super::env_keys::{observability as obv_keys, runner as runner_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Environment tool used when nothing is configured.
pub const DEFAULT_VENV_TOOL: &str = "virtualenv";

/// 隔离环境配置：环境工具、环境内可执行文件名、临时目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Environment tool command line; the environment directory is appended as last argument
    pub venv_tool: String,
    /// Installer executable inside `<env>/bin`
    pub installer: String,
    /// Interpreter executable inside `<env>/bin`
    pub interpreter: String,
    /// Parent directory for temporary artifacts
    pub tmp_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            venv_tool: DEFAULT_VENV_TOOL.to_string(),
            installer: "pip".to_string(),
            interpreter: "python".to_string(),
            tmp_dir: std::env::temp_dir(),
        }
    }
}

impl RunnerConfig {
    /// 从环境变量加载，空值使用默认（会自动加载 .env）
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let defaults = Self::default();
        Self {
            venv_tool: env_or(
                runner_keys::PYTHENV_VENV_TOOL,
                runner_keys::VENV_TOOL_ALIASES,
                || defaults.venv_tool.clone(),
            ),
            installer: env_or(runner_keys::PYTHENV_INSTALLER, &[], || {
                defaults.installer.clone()
            }),
            interpreter: env_or(runner_keys::PYTHENV_INTERPRETER, &[], || {
                defaults.interpreter.clone()
            }),
            tmp_dir: env_optional(runner_keys::PYTHENV_TMP_DIR, &[])
                .map(PathBuf::from)
                .unwrap_or(defaults.tmp_dir),
        }
    }

    /// Override with CLI parameters
    pub fn with_cli_overrides(mut self, venv_tool: Option<String>, tmp_dir: Option<PathBuf>) -> Self {
        if let Some(tool) = venv_tool.filter(|t| !t.trim().is_empty()) {
            self.venv_tool = tool;
        }
        if let Some(dir) = tmp_dir {
            self.tmp_dir = dir;
        }
        self
    }

    /// The environment tool split into program and leading arguments.
    pub fn venv_tool_argv(&self) -> Vec<String> {
        self.venv_tool.split_whitespace().map(String::from).collect()
    }

    /// Whether the environment tool is the built-in default (eligible for the `-m venv` fallback).
    pub fn uses_default_venv_tool(&self) -> bool {
        self.venv_tool.trim() == DEFAULT_VENV_TOOL
    }
}

/// 可观测性配置：quiet、log_level、log_json、audit_log
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    /// 读取缓存的配置；未调用过 `init` 时仅依据环境变量
    pub fn from_env() -> &'static Self {
        Self::init(false)
    }

    /// 启动时调用一次：`--quiet` 与 PYTHENV_QUIET 取或。只影响本进程，不写回环境变量，
    /// 因此不会泄漏给脚本。首次调用后结果固定。
    pub fn init(quiet: bool) -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self::load(quiet))
    }

    fn load(quiet: bool) -> Self {
        super::loader::load_dotenv();
        Self {
            quiet: quiet || env_bool(obv_keys::PYTHENV_QUIET, &[], false),
            log_level: env_or(obv_keys::PYTHENV_LOG_LEVEL, &[], || {
                "pythenv=info".to_string()
            }),
            log_json: env_bool(obv_keys::PYTHENV_LOG_JSON, &[], false),
            audit_log: env_optional(obv_keys::PYTHENV_AUDIT_LOG, &[]),
        }
    }
}
